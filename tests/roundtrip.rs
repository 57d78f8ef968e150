mod common;

use common::doc;
use metaform::{ArrayKind, DocumentStore, EditOp, EditSession, MetaValue, NodeKind, path};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn save_writes_edited_document_through_sink() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metadata.json5");

    let initial = doc(r#"{
        title: "Report",
        draft: true,
        authors: ["kim"],
    }"#);

    let mut session = EditSession::new(&initial)?;
    session.apply(EditOp::toggle_boolean(path!("draft")))?;
    session.apply(EditOp::set_string_array(path!("authors"), ["kim", "lee"]))?;
    session.apply(EditOp::add_field(path!("review"), "object"))?;
    session.apply(EditOp::add_field(path!("review", "approved"), "boolean"))?;

    let target = path.clone();
    let saved = session.save(move |document: &MetaValue| -> anyhow::Result<()> {
        std::fs::write(&target, document.to_json5_pretty())?;
        Ok(())
    })?;

    let text = std::fs::read_to_string(&path)?;
    let reloaded = MetaValue::parse_json5(&text)?;
    assert_eq!(
        reloaded,
        doc(r#"{
            title: "Report",
            draft: false,
            authors: ["kim", "lee"],
            review: { approved: false },
        }"#)
    );
    assert_eq!(saved, reloaded);

    // The caller's value was never touched.
    assert_eq!(initial.get("draft").and_then(MetaValue::as_bool), Some(true));
    Ok(())
}

#[test]
fn declared_string_array_saves_as_plain_empty_array() -> Result<()> {
    let mut store = DocumentStore::new(&doc("{ tags: [] }"))?;
    store.apply(EditOp::add_array_item(path!("tags"), "string"))?;
    assert_eq!(
        store.classify(&path!("tags"))?,
        NodeKind::Array(ArrayKind::StringArrayDeclared)
    );

    let text = store.document().to_json5_pretty();
    let reloaded = DocumentStore::new(&MetaValue::parse_json5(&text)?)?;
    assert_eq!(
        reloaded.classify(&path!("tags"))?,
        NodeKind::Array(ArrayKind::Empty)
    );
    Ok(())
}

#[test]
fn cancel_discards_edits() -> Result<()> {
    let initial = doc("{ a: 'x' }");
    let mut session = EditSession::new(&initial)?;
    session.apply(EditOp::remove_field(path!("a")))?;
    assert!(session.store().is_dirty());
    assert_eq!(session.document(), &doc("{}"));
    session.cancel();
    assert_eq!(initial, doc("{ a: 'x' }"));
    Ok(())
}

#[test]
fn unsupported_values_survive_editing_untouched() -> Result<()> {
    let initial = doc("{ count: 3, note: null, name: 'x' }");
    let mut store = DocumentStore::new(&initial)?;
    store.apply(EditOp::set_string(path!("name"), "y"))?;
    store.apply(EditOp::set_string(path!("name"), "x"))?;
    assert_eq!(store.document(), &initial);
    assert!(!store.is_dirty());
    Ok(())
}
