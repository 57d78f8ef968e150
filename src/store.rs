use crate::Path;
use crate::error::{EditError, EditResult};
use crate::kind::{NodeKind, classify};
use crate::ops::{EditOp, apply_op};
use crate::resolve::resolve;
use crate::value::MetaValue;
use crate::walk::{TreeWalk, walk};
use std::cell::Cell;
use std::fmt;

/// Receives the document after every successful edit.
pub trait ChangeObserver {
    fn on_change(&mut self, document: &MetaValue);
}

impl<F: FnMut(&MetaValue)> ChangeObserver for F {
    fn on_change(&mut self, document: &MetaValue) {
        self(document)
    }
}

/// Owns a document for the length of an editing session.
///
/// The document is a private deep copy of the value it was created from and
/// only changes through [`DocumentStore::apply`]. Edits cost only the walk to
/// their target; comparing against the baseline happens in [`is_dirty`].
///
/// [`is_dirty`]: DocumentStore::is_dirty
pub struct DocumentStore {
    root: MetaValue,
    original: MetaValue,
    revision: u64,
    /// Result of the last baseline comparison, cleared by every edit.
    dirty: Cell<Option<bool>>,
    observer: Option<Box<dyn ChangeObserver>>,
}

impl DocumentStore {
    pub fn new(initial: &MetaValue) -> EditResult<Self> {
        if !matches!(initial, MetaValue::Object(_)) {
            return Err(EditError::RootNotObject {
                found: initial.type_name(),
            });
        }
        let root = initial.clone();
        tracing::debug!(
            fields = root.as_object().map_or(0, |m| m.len()),
            "Created document store"
        );
        Ok(Self {
            original: root.clone(),
            root,
            revision: 0,
            dirty: Cell::new(Some(false)),
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: impl ChangeObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl ChangeObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Perform one edit.
    ///
    /// On success the observer sees the updated document and the same document
    /// is returned. On failure nothing changes and the observer is not called.
    pub fn apply(&mut self, op: EditOp) -> EditResult<&MetaValue> {
        if let Err(err) = apply_op(&mut self.root, &op) {
            tracing::warn!(op = op.name(), path = %op.path(), error = %err, "Edit rejected");
            return Err(err);
        }
        self.revision += 1;
        self.dirty.set(None);
        tracing::debug!(
            op = op.name(),
            path = %op.path(),
            revision = self.revision,
            "Applied edit"
        );

        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&self.root);
        }
        Ok(&self.root)
    }

    pub fn document(&self) -> &MetaValue {
        &self.root
    }

    /// Look up the node at `path`.
    pub fn get(&self, path: &Path) -> EditResult<&MetaValue> {
        resolve(&self.root, path)
    }

    /// Classify the node at `path`.
    pub fn classify(&self, path: &Path) -> EditResult<NodeKind> {
        let node = self.get(path)?;
        classify(node).map_err(|e| e.with_prefix(path))
    }

    /// Walk the current document. Each call starts over from the live tree.
    pub fn walk(&self) -> TreeWalk<'_> {
        walk(&self.root)
    }

    /// Number of successful edits so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the document differs from the value the store was created from.
    /// Editing a value back to its original state clears this again.
    ///
    /// The first call after an edit compares the whole document; later calls
    /// reuse the answer until the next edit.
    pub fn is_dirty(&self) -> bool {
        if let Some(dirty) = self.dirty.get() {
            return dirty;
        }
        let dirty = self.root != self.original;
        self.dirty.set(Some(dirty));
        dirty
    }

    pub fn into_document(self) -> MetaValue {
        self.root
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("root", &self.root)
            .field("revision", &self.revision)
            .field("dirty", &self.dirty.get())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
