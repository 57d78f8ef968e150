//! Read-only traversal of a document for presentation.
//!
//! [`TreeWalk`] yields one [`WalkItem`] per editable node in pre-order: object
//! fields in insertion order, array elements in index order. It descends into
//! objects and object arrays; everything else is a leaf rendered as a single
//! control. Numbers and nulls have no editable kind and are skipped.

use crate::kind::{NodeKind, classify};
use crate::value::MetaValue;
use crate::{Path, Seg};

/// A node as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkItem<'a> {
    /// Full path of the node; edits to it are addressed with this path.
    pub path: Path,
    /// The last segment of `path`.
    pub key: Seg,
    pub kind: NodeKind,
    pub node: &'a MetaValue,
    /// Nesting level below the walk's starting node, starting at 0.
    pub depth: usize,
}

impl WalkItem<'_> {
    /// Path of the container holding this node.
    pub fn parent_path(&self) -> Path {
        self.path.parent().unwrap_or_default()
    }
}

/// A node the walk skipped because it has no editable kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    pub path: Path,
    pub found: &'static str,
}

enum Children<'a> {
    Object(indexmap::map::Iter<'a, String, MetaValue>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, MetaValue>>),
}

struct Frame<'a> {
    path: Path,
    children: Children<'a>,
}

impl<'a> Frame<'a> {
    fn new(path: Path, node: &'a MetaValue) -> Option<Self> {
        let children = match node {
            MetaValue::Object(map) => Children::Object(map.iter()),
            MetaValue::Array(array) => Children::Array(array.iter().enumerate()),
            _ => return None,
        };
        Some(Self { path, children })
    }

    fn next_child(&mut self) -> Option<(Seg, &'a MetaValue)> {
        match &mut self.children {
            Children::Object(iter) => iter.next().map(|(k, v)| (Seg::Key(k.clone()), v)),
            Children::Array(iter) => iter.next().map(|(i, v)| (Seg::Index(i), v)),
        }
    }
}

/// Lazy pre-order iterator over a document. See the module docs.
pub struct TreeWalk<'a> {
    stack: Vec<Frame<'a>>,
    skipped: Vec<Unsupported>,
}

impl<'a> TreeWalk<'a> {
    /// Nodes skipped so far.
    pub fn skipped(&self) -> &[Unsupported] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<Unsupported> {
        self.skipped
    }
}

impl<'a> Iterator for TreeWalk<'a> {
    type Item = WalkItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((key, node)) = frame.next_child() else {
                self.stack.pop();
                continue;
            };
            let path = frame.path.child(key.clone());
            let depth = self.stack.len() - 1;

            let kind = match classify(node) {
                Ok(kind) => kind,
                Err(err) => {
                    let err = err.with_prefix(&path);
                    tracing::debug!(path = %path, error = %err, "Skipping unsupported node");
                    self.skipped.push(Unsupported {
                        path,
                        found: node.type_name(),
                    });
                    continue;
                }
            };

            if kind.is_container() {
                self.stack.extend(Frame::new(path.clone(), node));
            }
            return Some(WalkItem {
                path,
                key,
                kind,
                node,
                depth,
            });
        }
    }
}

/// Walk the children of `root`, which is usually the document root.
pub fn walk(root: &MetaValue) -> TreeWalk<'_> {
    walk_from(root, Path::root())
}

/// Walk the children of `node`, reporting paths relative to `base`.
///
/// A scalar `node` has no children and produces an empty walk.
pub fn walk_from(node: &MetaValue, base: Path) -> TreeWalk<'_> {
    TreeWalk {
        stack: Frame::new(base, node).into_iter().collect(),
        skipped: Vec::new(),
    }
}

/// Every node a full walk of `root` would skip.
pub fn unsupported(root: &MetaValue) -> Vec<Unsupported> {
    let mut walk = walk(root);
    walk.by_ref().for_each(drop);
    walk.into_skipped()
}
