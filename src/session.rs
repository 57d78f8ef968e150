use crate::error::EditResult;
use crate::ops::EditOp;
use crate::store::{ChangeObserver, DocumentStore};
use crate::value::MetaValue;
use anyhow::Context;

/// Where a saved document goes. Persistence format and transport are up to the
/// implementor.
pub trait SaveSink {
    fn save(&mut self, document: &MetaValue) -> anyhow::Result<()>;
}

impl<F: FnMut(&MetaValue) -> anyhow::Result<()>> SaveSink for F {
    fn save(&mut self, document: &MetaValue) -> anyhow::Result<()> {
        self(document)
    }
}

/// One editing session: a store plus the save/cancel boundary around it.
///
/// Both `save` and `cancel` consume the session, so no edit can follow either.
#[derive(Debug)]
pub struct EditSession {
    store: DocumentStore,
}

impl EditSession {
    pub fn new(initial: &MetaValue) -> EditResult<Self> {
        Ok(Self {
            store: DocumentStore::new(initial)?,
        })
    }

    pub fn with_observer(mut self, observer: impl ChangeObserver + 'static) -> Self {
        self.store.set_observer(observer);
        self
    }

    pub fn apply(&mut self, op: EditOp) -> EditResult<&MetaValue> {
        self.store.apply(op)
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn document(&self) -> &MetaValue {
        self.store.document()
    }

    /// Hand the edited document to `sink` and return it.
    pub fn save(self, mut sink: impl SaveSink) -> anyhow::Result<MetaValue> {
        let revision = self.store.revision();
        let dirty = self.store.is_dirty();
        let document = self.store.into_document();
        sink.save(&document)
            .with_context(|| format!("saving document at revision {revision}"))?;
        tracing::info!(revision, dirty, "Saved document");
        Ok(document)
    }

    /// Discard the session and every edit made in it.
    pub fn cancel(self) {
        tracing::info!(
            revision = self.store.revision(),
            dirty = self.store.is_dirty(),
            "Cancelled editing session"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::EditSession;
    use crate::ops::EditOp;
    use crate::path;
    use crate::value::MetaValue;

    #[test]
    fn save_error_carries_context() {
        let mut session = EditSession::new(&MetaValue::empty_object()).unwrap();
        session
            .apply(EditOp::add_field(path!("a"), "string"))
            .unwrap();
        let err = session
            .save(|_: &MetaValue| -> anyhow::Result<()> { anyhow::bail!("disk full") })
            .unwrap_err();
        assert_eq!(err.to_string(), "saving document at revision 1");
        assert_eq!(err.root_cause().to_string(), "disk full");
    }
}
