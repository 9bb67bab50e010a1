//! Resolved schema model shared by the index, renderer and catalog.

use crate::kind::ScalarKind;

/// What a single (element) value of a field is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Scalar(ScalarKind),
    /// Fully-qualified enum name, no leading dot.
    Enum(String),
    /// Fully-qualified message name, no leading dot.
    Message(String),
}

/// A field's shape: the element type plus its `repeated` / `map<K, _>`
/// modifiers. A map field is never also repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub value: ValueType,
    pub repeated: bool,
    pub map_key: Option<ScalarKind>,
}

impl FieldType {
    pub fn single(value: ValueType) -> Self {
        Self {
            value,
            repeated: false,
            map_key: None,
        }
    }

    pub fn repeated(value: ValueType) -> Self {
        Self {
            value,
            repeated: true,
            map_key: None,
        }
    }

    pub fn map(key: ScalarKind, value: ValueType) -> Self {
        Self {
            value,
            repeated: false,
            map_key: Some(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub leading_doc: String,
    pub trailing_note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub full_name: String,
    pub name: String,
    pub trailing_doc: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub full_name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
    pub trailing_note: String,
}

impl Enum {
    /// One `NAME(=N) note` line per value, in declaration order.
    pub fn value_listing(&self) -> String {
        self.values
            .iter()
            .map(|v| format!("{}(={}) {}", v.name, v.number, v.trailing_note).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Last segment of a dotted name.
pub(crate) fn short_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}
