//! Error types for document editing.

use crate::Path;
use thiserror::Error;

/// Result type alias for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors raised while classifying, resolving or mutating a document.
///
/// Every failing operation leaves the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A segment is missing, out of range, or steps into a non-container.
    #[error("path not found: {path}")]
    PathNotFound { path: Path },

    /// The value is not one of object, array, string or boolean.
    #[error("unsupported value at {path}: {found}")]
    UnsupportedType { path: Path, found: &'static str },

    /// A new field needs a non-empty name.
    #[error("invalid field name {name:?}")]
    InvalidFieldName { name: String },

    /// The target exists but has the wrong type for the operation.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// Documents are always rooted at an object.
    #[error("document root must be an object, found {found}")]
    RootNotObject { found: &'static str },
}

impl EditError {
    #[inline]
    pub fn path_not_found(path: Path) -> Self {
        EditError::PathNotFound { path }
    }

    #[inline]
    pub fn unsupported(path: Path, found: &'static str) -> Self {
        EditError::UnsupportedType { path, found }
    }

    #[inline]
    pub fn invalid_field_name(name: impl Into<String>) -> Self {
        EditError::InvalidFieldName { name: name.into() }
    }

    #[inline]
    pub fn type_mismatch(path: Path, expected: &'static str, found: &'static str) -> Self {
        EditError::TypeMismatch {
            path,
            expected,
            found,
        }
    }

    /// The path the error refers to, if it carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            EditError::PathNotFound { path }
            | EditError::UnsupportedType { path, .. }
            | EditError::TypeMismatch { path, .. } => Some(path),
            EditError::InvalidFieldName { .. } | EditError::RootNotObject { .. } => None,
        }
    }

    /// Rebase a path computed relative to a container onto the container's own path.
    ///
    /// Mutation helpers only see the container and the terminal segment, so they
    /// report paths like `$[7]`; the store prefixes them with the parent path.
    pub fn with_prefix(self, prefix: &Path) -> Self {
        match self {
            EditError::PathNotFound { path } => EditError::PathNotFound {
                path: prefix.join(&path),
            },
            EditError::UnsupportedType { path, found } => EditError::UnsupportedType {
                path: prefix.join(&path),
                found,
            },
            EditError::TypeMismatch {
                path,
                expected,
                found,
            } => EditError::TypeMismatch {
                path: prefix.join(&path),
                expected,
                found,
            },
            other => other,
        }
    }
}
