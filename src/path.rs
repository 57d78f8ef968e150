//! Paths into a metadata document.
//!
//! A path is a sequence of segments; each segment is either an object key or
//! an array index.

use crate::statics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step in a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object field name.
    Key(String),
    /// Array element position.
    Index(usize),
}

impl Seg {
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => write!(f, ".{}", k),
            Seg::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// The address of a node, from the document root down.
///
/// # Examples
///
/// ```
/// use metaform::Path;
///
/// let path = Path::root().key("variants").index(0).key("label");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "$.variants[0].label");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<Seg>);

impl Path {
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Append a key segment (builder style).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment (builder style).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Seg> {
        self.0.pop()
    }

    /// Return a new path with `seg` appended.
    pub fn child(&self, seg: impl Into<Seg>) -> Path {
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.extend_from_slice(&self.0);
        next.push(seg.into());
        Path(next)
    }

    /// The path of the container holding this node; `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.0.split_last()?;
        Some(Path(init.to_vec()))
    }

    #[inline]
    pub fn last(&self) -> Option<&Seg> {
        self.0.last()
    }

    /// The first `len` segments as a new path.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Seg> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The empty path addresses the document root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns true if `ancestor` is a prefix of `self` (or equal to it).
    pub fn starts_with(&self, ancestor: &Path) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    /// Concatenate two paths.
    pub fn join(&self, rest: &Path) -> Path {
        let mut next = self.0.clone();
        next.extend(rest.0.iter().cloned());
        Path(next)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(statics::PATH_ROOT)?;
        for seg in &self.0 {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl From<Vec<Seg>> for Path {
    fn from(segments: Vec<Seg>) -> Self {
        Path(segments)
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<T: IntoIterator<Item = Seg>>(iter: T) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Path`] from keys and indices.
///
/// ```
/// use metaform::path;
///
/// let p = path!("variants", 0, "label");
/// assert_eq!(p.to_string(), "$.variants[0].label");
/// assert!(path!().is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {
        $crate::Path::from_segments(vec![$($crate::Seg::from($seg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::{Path, Seg};

    #[test]
    fn display_mixes_keys_and_indices() {
        let p = path!("a", 2, "b");
        assert_eq!(p.to_string(), "$.a[2].b");
        assert_eq!(Path::root().to_string(), "$");
    }

    #[test]
    fn parent_and_last() {
        let p = path!("a", 2, "b");
        assert_eq!(p.parent(), Some(path!("a", 2)));
        assert_eq!(p.last(), Some(&Seg::key("b")));
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn child_leaves_original_untouched() {
        let base = path!("a");
        let next = base.child(3usize);
        assert_eq!(base.len(), 1);
        assert_eq!(next, path!("a", 3));
        assert!(next.starts_with(&base));
    }

    #[test]
    fn prefix_is_clamped() {
        let p = path!("a", "b");
        assert_eq!(p.prefix(1), path!("a"));
        assert_eq!(p.prefix(9), p);
    }

    #[test]
    fn empty_path_is_the_root() {
        assert!(Path::root().is_empty());
        assert!(path!().is_root());
        assert_eq!(path!().len(), 0);
        assert!(!path!("a").is_empty());
    }
}
