// Central place for type names and other non-localized constants.
// Keep these out of the mutation code so names stay consistent in logs and errors.

// Field type names, as offered by an "add field" control.
pub const TYPE_OBJECT: &str = "object";
pub const TYPE_ARRAY: &str = "array";
pub const TYPE_STRING: &str = "string";
pub const TYPE_BOOLEAN: &str = "boolean";

// Node kind names for array sub-kinds.
pub const KIND_STRING_ARRAY_DECLARED: &str = "string array (declared)";
pub const KIND_EMPTY_ARRAY: &str = "empty array";
pub const KIND_STRING_ARRAY: &str = "string array";
pub const KIND_OBJECT_ARRAY: &str = "object array";

// Display of the document root in paths.
pub const PATH_ROOT: &str = "$";

// JSON5 output
pub const JSON5_INDENT: usize = 4;
