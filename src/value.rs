use crate::statics;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// A number kept as I64, U64 or F64 so text output keeps the integer/float distinction.
/// Numbers can appear in loaded documents but are not an editable node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Serialize for MetaNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaNumber::I64(v) => serializer.serialize_i64(*v),
            MetaNumber::U64(v) => serializer.serialize_u64(*v),
            MetaNumber::F64(v) => serializer.serialize_f64(*v),
        }
    }
}

impl MetaNumber {
    fn write_json5(&self, out: &mut String) {
        match self {
            MetaNumber::I64(v) => out.push_str(&v.to_string()),
            MetaNumber::U64(v) => out.push_str(&v.to_string()),
            MetaNumber::F64(v) => {
                if v.is_nan() {
                    out.push_str("NaN");
                } else if v.is_infinite() {
                    if v.is_sign_negative() {
                        out.push_str("-Infinity");
                    } else {
                        out.push_str("Infinity");
                    }
                } else {
                    let mut buf = ryu::Buffer::new();
                    out.push_str(buf.format(*v));
                }
            }
        }
    }
}

/// Element kind an array is declared to hold before it has any elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    String,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            ElementType::String => statics::TYPE_STRING,
        }
    }
}

/// An array node: its elements plus an optional declared element type.
///
/// The declared type is an editing hint only. It takes part in equality but is
/// not serialized, so a declared-but-empty string array saves as `[]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaArray {
    pub items: Vec<MetaValue>,
    pub declared: Option<ElementType>,
}

impl MetaArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declared_strings(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            items: values.into_iter().map(MetaValue::String).collect(),
            declared: Some(ElementType::String),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&MetaValue> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&MetaValue> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MetaValue> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetaValue> {
        self.items.iter()
    }
}

impl From<Vec<MetaValue>> for MetaArray {
    fn from(items: Vec<MetaValue>) -> Self {
        Self {
            items,
            declared: None,
        }
    }
}

/// A node in an edited metadata document.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(MetaNumber),
    String(String),
    Array(MetaArray),
    Object(IndexMap<String, MetaValue>),
}

impl MetaValue {
    pub fn empty_object() -> Self {
        MetaValue::Object(IndexMap::new())
    }

    pub fn empty_array() -> Self {
        MetaValue::Array(MetaArray::new())
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&MetaArray> {
        match self {
            MetaValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut MetaArray> {
        match self {
            MetaValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MetaValue> {
        self.as_object_mut().and_then(|m| m.get_mut(key))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, MetaValue::Object(_) | MetaValue::Array(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MetaValue::Null => "null",
            MetaValue::Bool(_) => statics::TYPE_BOOLEAN,
            MetaValue::Number(_) => "number",
            MetaValue::String(_) => statics::TYPE_STRING,
            MetaValue::Array(_) => statics::TYPE_ARRAY,
            MetaValue::Object(_) => statics::TYPE_OBJECT,
        }
    }

    pub fn parse_json5(text: &str) -> anyhow::Result<MetaValue> {
        Ok(json5::from_str::<MetaValue>(text)?)
    }

    pub fn to_json5_pretty(&self) -> String {
        let mut out = String::new();
        self.write_json5(&mut out, 0, true);
        out.push('\n');
        out
    }

    pub fn to_json5_compact(&self) -> String {
        let mut out = String::new();
        self.write_json5(&mut out, 0, false);
        out
    }

    fn write_json5(&self, out: &mut String, indent: usize, pretty: bool) {
        let step = statics::JSON5_INDENT;
        match self {
            MetaValue::Null => out.push_str("null"),
            MetaValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            MetaValue::Number(n) => n.write_json5(out),
            MetaValue::String(s) => write_escaped_string(out, s),
            MetaValue::Array(array) => {
                out.push('[');
                if pretty && !array.is_empty() {
                    out.push('\n');
                }
                for (i, v) in array.iter().enumerate() {
                    if pretty {
                        out.push_str(&" ".repeat(indent + step));
                    } else if i > 0 {
                        out.push(' ');
                    }
                    v.write_json5(out, indent + step, pretty);
                    if i + 1 != array.len() {
                        out.push(',');
                    }
                    if pretty {
                        out.push('\n');
                    }
                }
                if pretty && !array.is_empty() {
                    out.push_str(&" ".repeat(indent));
                }
                out.push(']');
            }
            MetaValue::Object(map) => {
                out.push('{');
                if pretty && !map.is_empty() {
                    out.push('\n');
                }
                for (i, (k, v)) in map.iter().enumerate() {
                    if pretty {
                        out.push_str(&" ".repeat(indent + step));
                    } else if i > 0 {
                        out.push(' ');
                    }
                    write_escaped_string(out, k);
                    out.push(':');
                    out.push(' ');
                    v.write_json5(out, indent + step, pretty);
                    if i + 1 != map.len() {
                        out.push(',');
                    }
                    if pretty {
                        out.push('\n');
                    }
                }
                if pretty && !map.is_empty() {
                    out.push_str(&" ".repeat(indent));
                }
                out.push('}');
            }
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json5_compact())
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::String(v.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::String(v)
    }
}

impl From<MetaArray> for MetaValue {
    fn from(v: MetaArray) -> Self {
        MetaValue::Array(v)
    }
}

impl From<IndexMap<String, MetaValue>> for MetaValue {
    fn from(v: IndexMap<String, MetaValue>) -> Self {
        MetaValue::Object(v)
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04X}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaValue::Null => serializer.serialize_unit(),
            MetaValue::Bool(v) => serializer.serialize_bool(*v),
            MetaValue::Number(n) => n.serialize(serializer),
            MetaValue::String(s) => serializer.serialize_str(s),
            // The declared element type is not part of the saved shape.
            MetaValue::Array(array) => array.items.serialize(serializer),
            MetaValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MetaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = MetaValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(MetaValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(MetaValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(MetaValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(MetaValue::Number(MetaNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(MetaValue::Number(MetaNumber::U64(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(MetaValue::Number(MetaNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(MetaValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(MetaValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<MetaValue>()? {
                    values.push(value);
                }
                Ok(MetaValue::Array(MetaArray::from(values)))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, MetaValue>()? {
                    values.insert(key, value);
                }
                Ok(MetaValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementType, MetaArray, MetaNumber, MetaValue};

    #[test]
    fn parse_json5_keeps_key_order() {
        let v = MetaValue::parse_json5("{ zeta: 'z', alpha: true, mid: [] }").unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn parse_json5_keeps_numbers_and_nulls() {
        let v = MetaValue::parse_json5("{ count: 3, ratio: 0.5, gone: null }").unwrap();
        assert!(matches!(v.get("count"), Some(MetaValue::Number(_))));
        assert_eq!(v.get("ratio"), Some(&MetaValue::Number(MetaNumber::F64(0.5))));
        assert_eq!(v.get("gone"), Some(&MetaValue::Null));
    }

    #[test]
    fn declared_marker_is_not_written() {
        let mut array = MetaArray::new();
        array.declared = Some(ElementType::String);
        let mut root = MetaValue::empty_object();
        root.as_object_mut()
            .unwrap()
            .insert("tags".to_string(), MetaValue::Array(array));
        assert_eq!(root.to_json5_compact(), "{\"tags\": []}");
    }

    #[test]
    fn declared_marker_takes_part_in_equality() {
        let plain = MetaValue::empty_array();
        let declared = MetaValue::Array(MetaArray::declared_strings(Vec::new()));
        assert_ne!(plain, declared);
    }

    #[test]
    fn pretty_output_parses_back() {
        let text = "{ name: \"Wid\\\"get\", nested: { on: false, list: [\"a\", \"b\"] } }";
        let v = MetaValue::parse_json5(text).unwrap();
        let again = MetaValue::parse_json5(&v.to_json5_pretty()).unwrap();
        assert_eq!(v, again);
    }

    #[test]
    fn display_uses_compact_form() {
        let v = MetaValue::parse_json5("{ a: [true, 'x'] }").unwrap();
        assert_eq!(v.to_string(), "{\"a\": [true, \"x\"]}");
    }
}
