//! The mutation operations.
//!
//! Each function works on the container that owns the target (as returned by
//! [`resolve_parent_mut`]) and the terminal segment. All checks happen before
//! the first write, so an error always leaves the container as it was. Errors
//! carry paths relative to the container; [`apply_op`] rebases them.

use crate::error::{EditError, EditResult};
use crate::kind::FieldType;
use crate::resolve::{resolve_mut, resolve_parent_mut};
use crate::value::{ElementType, MetaArray, MetaValue};
use crate::{Path, Seg, statics};
use serde::{Deserialize, Serialize};

fn relative(seg: &Seg) -> Path {
    Path::root().child(seg.clone())
}

/// Store `value` at `seg`: insert or replace an object field, or replace an
/// existing array element.
fn put(container: &mut MetaValue, seg: &Seg, value: MetaValue) -> EditResult<()> {
    match (container, seg) {
        (MetaValue::Object(map), Seg::Key(key)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (MetaValue::Array(array), Seg::Index(index)) => {
            let slot = array
                .get_mut(*index)
                .ok_or_else(|| EditError::path_not_found(relative(seg)))?;
            *slot = value;
            Ok(())
        }
        _ => Err(EditError::path_not_found(relative(seg))),
    }
}

/// Set `seg` to the zero value of `field_type`.
///
/// An existing field of the same name is overwritten and keeps its position.
/// On an array, index `len` appends and a smaller index replaces.
pub fn add_field(container: &mut MetaValue, seg: &Seg, field_type: FieldType) -> EditResult<()> {
    if seg.as_key().is_some_and(str::is_empty) {
        return Err(EditError::invalid_field_name(""));
    }
    match (container, seg) {
        (MetaValue::Array(array), Seg::Index(index)) if *index == array.len() => {
            array.items.push(field_type.zero_value());
            Ok(())
        }
        (container, seg) => put(container, seg, field_type.zero_value()),
    }
}

/// Delete `seg` from its container and return what was there.
///
/// A missing key or out-of-range index is not an error. Removing an array
/// element shifts the later elements down.
pub fn remove_field(container: &mut MetaValue, seg: &Seg) -> Option<MetaValue> {
    match (container, seg) {
        (MetaValue::Object(map), Seg::Key(key)) => map.shift_remove(key),
        (MetaValue::Array(array), Seg::Index(index)) if *index < array.len() => {
            Some(array.items.remove(*index))
        }
        _ => None,
    }
}

pub fn set_string_value(container: &mut MetaValue, seg: &Seg, value: String) -> EditResult<()> {
    put(container, seg, MetaValue::String(value))
}

/// Flip the boolean at `seg` and return the new value.
///
/// A missing object field counts as `false`.
pub fn toggle_boolean(container: &mut MetaValue, seg: &Seg) -> EditResult<bool> {
    let current = match (&*container, seg) {
        (MetaValue::Object(map), Seg::Key(key)) => map.get(key),
        (MetaValue::Array(array), Seg::Index(index)) => Some(
            array
                .get(*index)
                .ok_or_else(|| EditError::path_not_found(relative(seg)))?,
        ),
        _ => return Err(EditError::path_not_found(relative(seg))),
    };
    let flipped = match current {
        None => true,
        Some(MetaValue::Bool(b)) => !b,
        Some(other) => {
            return Err(EditError::type_mismatch(
                relative(seg),
                statics::TYPE_BOOLEAN,
                other.type_name(),
            ));
        }
    };
    put(container, seg, MetaValue::Bool(flipped))?;
    Ok(flipped)
}

/// Replace the array at `seg` with `values`, in order and duplicates included.
///
/// The replacement is a plain array with no declared element type, so an
/// emptied list classifies as [`ArrayKind::Empty`](crate::ArrayKind::Empty).
pub fn set_string_array(
    container: &mut MetaValue,
    seg: &Seg,
    values: Vec<String>,
) -> EditResult<()> {
    let items: Vec<MetaValue> = values.into_iter().map(MetaValue::String).collect();
    put(container, seg, MetaValue::Array(MetaArray::from(items)))
}

/// Add an element to `target`, which must be an array.
///
/// Objects, arrays and booleans append their zero value. A string does not
/// append anything: it declares the array as a string array instead, and the
/// strings are then edited as a whole list through [`set_string_array`].
pub fn add_array_item(target: &mut MetaValue, item_type: FieldType) -> EditResult<()> {
    let found = target.type_name();
    let MetaValue::Array(array) = target else {
        return Err(EditError::type_mismatch(
            Path::root(),
            statics::TYPE_ARRAY,
            found,
        ));
    };
    match item_type {
        FieldType::String => array.declared = Some(ElementType::String),
        other => array.items.push(other.zero_value()),
    }
    Ok(())
}

/// One edit to a document, addressed by the full path of its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// The last segment of `path` names the new field (or array index).
    AddField { path: Path, field_type: FieldType },
    RemoveField { path: Path },
    SetString { path: Path, value: String },
    ToggleBoolean { path: Path },
    SetStringArray { path: Path, values: Vec<String> },
    /// `path` addresses the array itself.
    AddArrayItem { path: Path, item_type: FieldType },
}

impl EditOp {
    pub fn add_field(path: Path, field_type: impl Into<FieldType>) -> Self {
        EditOp::AddField {
            path,
            field_type: field_type.into(),
        }
    }

    pub fn remove_field(path: Path) -> Self {
        EditOp::RemoveField { path }
    }

    pub fn set_string(path: Path, value: impl Into<String>) -> Self {
        EditOp::SetString {
            path,
            value: value.into(),
        }
    }

    pub fn toggle_boolean(path: Path) -> Self {
        EditOp::ToggleBoolean { path }
    }

    pub fn set_string_array<I, S>(path: Path, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EditOp::SetStringArray {
            path,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_array_item(path: Path, item_type: impl Into<FieldType>) -> Self {
        EditOp::AddArrayItem {
            path,
            item_type: item_type.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            EditOp::AddField { path, .. }
            | EditOp::RemoveField { path }
            | EditOp::SetString { path, .. }
            | EditOp::ToggleBoolean { path }
            | EditOp::SetStringArray { path, .. }
            | EditOp::AddArrayItem { path, .. } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditOp::AddField { .. } => "add_field",
            EditOp::RemoveField { .. } => "remove_field",
            EditOp::SetString { .. } => "set_string",
            EditOp::ToggleBoolean { .. } => "toggle_boolean",
            EditOp::SetStringArray { .. } => "set_string_array",
            EditOp::AddArrayItem { .. } => "add_array_item",
        }
    }
}

fn with_parent<T>(
    root: &mut MetaValue,
    path: &Path,
    f: impl FnOnce(&mut MetaValue, &Seg) -> EditResult<T>,
) -> EditResult<T> {
    let (container, seg) = resolve_parent_mut(root, path)?;
    f(container, seg).map_err(|e| e.with_prefix(&path.prefix(path.len() - 1)))
}

/// Resolve `op`'s target in `root` and perform it.
pub fn apply_op(root: &mut MetaValue, op: &EditOp) -> EditResult<()> {
    match op {
        EditOp::AddField { path, field_type } => {
            if path.is_root() {
                return Err(EditError::invalid_field_name(""));
            }
            with_parent(root, path, |container, seg| {
                add_field(container, seg, *field_type)
            })
        }
        EditOp::RemoveField { path } => with_parent(root, path, |container, seg| {
            remove_field(container, seg);
            Ok(())
        }),
        EditOp::SetString { path, value } => with_parent(root, path, |container, seg| {
            set_string_value(container, seg, value.clone())
        }),
        EditOp::ToggleBoolean { path } => with_parent(root, path, |container, seg| {
            toggle_boolean(container, seg).map(|_| ())
        }),
        EditOp::SetStringArray { path, values } => with_parent(root, path, |container, seg| {
            set_string_array(container, seg, values.clone())
        }),
        EditOp::AddArrayItem { path, item_type } => {
            let target = resolve_mut(root, path)?;
            add_array_item(target, *item_type).map_err(|e| e.with_prefix(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn parse(text: &str) -> MetaValue {
        MetaValue::parse_json5(text).unwrap()
    }

    #[test]
    fn add_field_sets_zero_values() {
        let mut obj = parse("{}");
        for ty in FieldType::ALL {
            add_field(&mut obj, &Seg::key(ty.name()), ty).unwrap();
        }
        assert_eq!(
            obj,
            parse("{ object: {}, array: [], string: '', boolean: false }")
        );
    }

    fn keys(value: &MetaValue) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn add_field_overwrites_in_place() {
        let mut obj = parse("{ a: 'x', b: true, c: 'z' }");
        add_field(&mut obj, &Seg::key("a"), FieldType::Array).unwrap();
        assert_eq!(obj, parse("{ a: [], b: true, c: 'z' }"));
        assert_eq!(keys(&obj), ["a", "b", "c"]);

        add_field(&mut obj, &Seg::key("b"), FieldType::String).unwrap();
        assert_eq!(keys(&obj), ["a", "b", "c"]);
    }

    #[test]
    fn add_field_rejects_empty_name() {
        let mut obj = parse("{ a: 'x' }");
        assert_eq!(
            add_field(&mut obj, &Seg::key(""), FieldType::String),
            Err(EditError::invalid_field_name(""))
        );
        assert_eq!(obj, parse("{ a: 'x' }"));
    }

    #[test]
    fn add_field_on_array_appends_at_len() {
        let mut arr = parse("[{ a: 'x' }]");
        add_field(&mut arr, &Seg::index(1), FieldType::Object).unwrap();
        assert_eq!(arr, parse("[{ a: 'x' }, {}]"));

        assert_eq!(
            add_field(&mut arr, &Seg::index(5), FieldType::Object),
            Err(EditError::path_not_found(path!(5)))
        );
        assert_eq!(arr.as_array().unwrap().len(), 2);
    }

    #[test]
    fn remove_field_shifts_array_and_ignores_missing() {
        let mut obj = parse("{ a: 1, b: 2, c: 3 }");
        assert!(remove_field(&mut obj, &Seg::key("b")).is_some());
        assert!(remove_field(&mut obj, &Seg::key("zzz")).is_none());
        assert_eq!(keys(&obj), ["a", "c"]);

        let mut arr = parse("['a', 'b', 'c']");
        remove_field(&mut arr, &Seg::index(0));
        remove_field(&mut arr, &Seg::index(9));
        assert_eq!(arr, parse("['b', 'c']"));
    }

    #[test]
    fn set_string_value_creates_on_object_but_not_on_array() {
        let mut obj = parse("{}");
        set_string_value(&mut obj, &Seg::key("name"), "Widget".into()).unwrap();
        assert_eq!(obj, parse("{ name: 'Widget' }"));

        let mut arr = parse("['a']");
        set_string_value(&mut arr, &Seg::index(0), "z".into()).unwrap();
        assert_eq!(
            set_string_value(&mut arr, &Seg::index(1), "y".into()),
            Err(EditError::path_not_found(path!(1)))
        );
        assert_eq!(arr, parse("['z']"));
    }

    #[test]
    fn toggle_boolean_flips_and_coerces_missing() {
        let mut obj = parse("{ on: true }");
        assert_eq!(toggle_boolean(&mut obj, &Seg::key("on")), Ok(false));
        assert_eq!(toggle_boolean(&mut obj, &Seg::key("on")), Ok(true));
        assert_eq!(toggle_boolean(&mut obj, &Seg::key("new")), Ok(true));
        assert_eq!(obj, parse("{ on: true, new: true }"));
    }

    #[test]
    fn toggle_boolean_rejects_non_booleans() {
        let mut obj = parse("{ name: 'x' }");
        assert_eq!(
            toggle_boolean(&mut obj, &Seg::key("name")),
            Err(EditError::type_mismatch(path!("name"), "boolean", "string"))
        );
        assert_eq!(obj, parse("{ name: 'x' }"));
    }

    #[test]
    fn set_string_array_replaces_whole_list() {
        let mut obj = parse("{ tags: ['old'] }");
        set_string_array(
            &mut obj,
            &Seg::key("tags"),
            vec!["b".into(), "a".into(), "b".into()],
        )
        .unwrap();
        let tags = obj.get("tags").unwrap().as_array().unwrap();
        assert_eq!(tags.declared, None);
        let items: Vec<&str> = tags.iter().filter_map(MetaValue::as_str).collect();
        assert_eq!(items, ["b", "a", "b"]);
    }

    #[test]
    fn set_string_array_drops_a_declared_marker() {
        let mut obj = MetaValue::from(indexmap::IndexMap::from([(
            "tags".to_string(),
            MetaValue::Array(MetaArray::declared_strings(Vec::new())),
        )]));
        set_string_array(&mut obj, &Seg::key("tags"), vec!["red".into()]).unwrap();
        assert_eq!(obj, parse("{ tags: ['red'] }"));

        set_string_array(&mut obj, &Seg::key("tags"), Vec::new()).unwrap();
        assert_eq!(obj, parse("{ tags: [] }"));
    }

    #[test]
    fn add_array_item_string_declares_instead_of_appending() {
        let mut arr = parse("[]");
        add_array_item(&mut arr, FieldType::String).unwrap();
        let array = arr.as_array().unwrap();
        assert!(array.is_empty());
        assert_eq!(array.declared, Some(ElementType::String));
    }

    #[test]
    fn add_array_item_appends_other_types() {
        let mut arr = parse("[]");
        add_array_item(&mut arr, FieldType::Object).unwrap();
        add_array_item(&mut arr, FieldType::Array).unwrap();
        add_array_item(&mut arr, FieldType::Boolean).unwrap();
        assert_eq!(arr, parse("[{}, [], false]"));
    }

    #[test]
    fn add_array_item_requires_array() {
        let mut obj = parse("{}");
        assert_eq!(
            add_array_item(&mut obj, FieldType::Object),
            Err(EditError::type_mismatch(path!(), "array", "object"))
        );
    }

    #[test]
    fn apply_op_rebases_errors_onto_full_path() {
        let mut doc = parse("{ flags: { name: 'x' } }");
        assert_eq!(
            apply_op(&mut doc, &EditOp::toggle_boolean(path!("flags", "name"))),
            Err(EditError::type_mismatch(
                path!("flags", "name"),
                "boolean",
                "string"
            ))
        );
        assert_eq!(
            apply_op(&mut doc, &EditOp::add_array_item(path!("flags"), "object")),
            Err(EditError::type_mismatch(path!("flags"), "array", "object"))
        );
    }

    #[test]
    fn apply_op_add_field_needs_a_name() {
        let mut doc = parse("{}");
        assert_eq!(
            apply_op(&mut doc, &EditOp::add_field(path!(), "object")),
            Err(EditError::invalid_field_name(""))
        );
    }

    #[test]
    fn edit_op_name_and_path() {
        let op = EditOp::set_string_array(path!("tags"), ["a", "b"]);
        assert_eq!(op.name(), "set_string_array");
        assert_eq!(op.path(), &path!("tags"));
    }
}
