//! Path resolution.
//!
//! Key segments step into objects, index segments step into arrays. Any other
//! combination fails with [`EditError::PathNotFound`] naming the prefix that
//! could not be resolved.

use crate::error::{EditError, EditResult};
use crate::value::MetaValue;
use crate::{Path, Seg};

fn step<'a>(node: &'a MetaValue, seg: &Seg) -> Option<&'a MetaValue> {
    match (seg, node) {
        (Seg::Key(key), MetaValue::Object(map)) => map.get(key),
        (Seg::Index(index), MetaValue::Array(array)) => array.get(*index),
        _ => None,
    }
}

fn step_mut<'a>(node: &'a mut MetaValue, seg: &Seg) -> Option<&'a mut MetaValue> {
    match (seg, node) {
        (Seg::Key(key), MetaValue::Object(map)) => map.get_mut(key),
        (Seg::Index(index), MetaValue::Array(array)) => array.get_mut(*index),
        _ => None,
    }
}

/// Resolve the full path to the node it names.
pub fn resolve<'a>(root: &'a MetaValue, path: &Path) -> EditResult<&'a MetaValue> {
    let mut node = root;
    for (i, seg) in path.iter().enumerate() {
        node = step(node, seg).ok_or_else(|| EditError::path_not_found(path.prefix(i + 1)))?;
    }
    Ok(node)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut MetaValue, path: &Path) -> EditResult<&'a mut MetaValue> {
    let mut node = root;
    for (i, seg) in path.iter().enumerate() {
        node = step_mut(node, seg).ok_or_else(|| EditError::path_not_found(path.prefix(i + 1)))?;
    }
    Ok(node)
}

/// Resolve every segment but the last and return the container that owns the
/// last one, together with that terminal segment.
///
/// The terminal segment itself is not checked; it may name a field that does
/// not exist yet.
pub fn resolve_parent_mut<'a, 'p>(
    root: &'a mut MetaValue,
    path: &'p Path,
) -> EditResult<(&'a mut MetaValue, &'p Seg)> {
    let Some((last, init)) = path.segments().split_last() else {
        return Err(EditError::path_not_found(path.clone()));
    };
    let parent_path = Path::from_segments(init.to_vec());
    let container = resolve_mut(root, &parent_path)?;
    if !container.is_container() {
        return Err(EditError::path_not_found(parent_path));
    }
    Ok((container, last))
}
