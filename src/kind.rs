//! Node classification.
//!
//! Documents carry no schema, so the kind of each node is derived from its
//! value. Arrays are split further by their declared element type or, failing
//! that, by their first element.

use crate::error::{EditError, EditResult};
use crate::value::{ElementType, MetaValue};
use crate::{Path, statics};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an array should be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// Empty, but declared to hold strings.
    StringArrayDeclared,
    /// Empty with no declared type; its kind is settled by the first element added.
    Empty,
    /// First element is a string; edited as a whole list.
    StringArray,
    /// First element is an object, array or boolean; elements are edited one by one.
    ObjectArray,
}

/// The editable kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array(ArrayKind),
    String,
    Boolean,
}

impl NodeKind {
    /// Leaves are rendered as a single control; the walker does not descend into them.
    pub fn is_leaf(self) -> bool {
        !self.is_container()
    }

    /// Kinds whose children are walked individually.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array(ArrayKind::ObjectArray))
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Object => statics::TYPE_OBJECT,
            NodeKind::String => statics::TYPE_STRING,
            NodeKind::Boolean => statics::TYPE_BOOLEAN,
            NodeKind::Array(ArrayKind::StringArrayDeclared) => statics::KIND_STRING_ARRAY_DECLARED,
            NodeKind::Array(ArrayKind::Empty) => statics::KIND_EMPTY_ARRAY,
            NodeKind::Array(ArrayKind::StringArray) => statics::KIND_STRING_ARRAY,
            NodeKind::Array(ArrayKind::ObjectArray) => statics::KIND_OBJECT_ARRAY,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determine the kind of `value`.
///
/// Numbers and nulls are not editable and fail with [`EditError::UnsupportedType`]
/// at the root path; callers holding the real path rebase it with
/// [`EditError::with_prefix`].
pub fn classify(value: &MetaValue) -> EditResult<NodeKind> {
    match value {
        MetaValue::String(_) => Ok(NodeKind::String),
        MetaValue::Bool(_) => Ok(NodeKind::Boolean),
        MetaValue::Array(array) => {
            let Some(first) = array.first() else {
                return Ok(match array.declared {
                    Some(ElementType::String) => NodeKind::Array(ArrayKind::StringArrayDeclared),
                    None => NodeKind::Array(ArrayKind::Empty),
                });
            };
            match first {
                MetaValue::String(_) => Ok(NodeKind::Array(ArrayKind::StringArray)),
                MetaValue::Object(_) | MetaValue::Array(_) | MetaValue::Bool(_) => {
                    Ok(NodeKind::Array(ArrayKind::ObjectArray))
                }
                other => Err(EditError::unsupported(Path::root().index(0), other.type_name())),
            }
        }
        MetaValue::Object(_) => Ok(NodeKind::Object),
        MetaValue::Number(_) | MetaValue::Null => {
            Err(EditError::unsupported(Path::root(), value.type_name()))
        }
    }
}

/// The type picked when adding a field or an array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Object,
    Array,
    String,
    Boolean,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Object,
        FieldType::Array,
        FieldType::String,
        FieldType::Boolean,
    ];

    /// Strict lookup by name.
    pub fn from_name(name: &str) -> Option<FieldType> {
        match name {
            statics::TYPE_OBJECT => Some(FieldType::Object),
            statics::TYPE_ARRAY => Some(FieldType::Array),
            statics::TYPE_STRING => Some(FieldType::String),
            statics::TYPE_BOOLEAN => Some(FieldType::Boolean),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::Object => statics::TYPE_OBJECT,
            FieldType::Array => statics::TYPE_ARRAY,
            FieldType::String => statics::TYPE_STRING,
            FieldType::Boolean => statics::TYPE_BOOLEAN,
        }
    }

    /// `{}`, `[]`, `""` or `false`.
    pub fn zero_value(self) -> MetaValue {
        match self {
            FieldType::Object => MetaValue::empty_object(),
            FieldType::Array => MetaValue::empty_array(),
            FieldType::String => MetaValue::String(String::new()),
            FieldType::Boolean => MetaValue::Bool(false),
        }
    }
}

/// Lenient lookup: unrecognized names fall back to `Object`.
impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        FieldType::from_name(name).unwrap_or(FieldType::Object)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
