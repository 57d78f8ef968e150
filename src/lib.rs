//! Core library for editing schema-less metadata documents.
//! Provides node classification, path-addressed in-place mutation that keeps
//! the document's structure intact, and a lazy walk for building editor UIs.

mod error;
mod kind;
mod ops;
mod path;
mod resolve;
mod session;
pub mod statics;
mod store;
mod value;
mod walk;

pub use error::{EditError, EditResult};
pub use kind::{ArrayKind, FieldType, NodeKind, classify};
pub use ops::{
    EditOp, add_array_item, add_field, apply_op, remove_field, set_string_array,
    set_string_value, toggle_boolean,
};
pub use path::{Path, Seg};
pub use resolve::{resolve, resolve_mut, resolve_parent_mut};
pub use session::{EditSession, SaveSink};
pub use store::{ChangeObserver, DocumentStore};
pub use value::{ElementType, MetaArray, MetaNumber, MetaValue};
pub use walk::{TreeWalk, Unsupported, WalkItem, unsupported, walk, walk_from};
