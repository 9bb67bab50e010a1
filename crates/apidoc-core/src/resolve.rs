//! Field resolution: raw field descriptor → rendered field shape.

use crate::index::SchemaIndex;
use crate::kind::ScalarKind;
use crate::model::{Field, FieldType, ValueType};
use apidoc_descriptor::{FieldDescriptor, MessageDescriptor, WireType};
use std::collections::HashMap;

/// Synthetic map-entry types nested directly in one message, by full name.
///
/// Only consulted while resolving that message's own fields.
#[derive(Debug, Default)]
pub(crate) struct MapEntries<'a> {
    entries: HashMap<&'a str, &'a MessageDescriptor>,
}

impl<'a> MapEntries<'a> {
    pub(crate) fn collect(message: &'a MessageDescriptor) -> Self {
        let entries = message
            .nested_messages
            .iter()
            .filter(|n| n.is_map_entry())
            .map(|n| (n.full_name.as_str(), n))
            .collect();
        Self { entries }
    }

    fn get(&self, type_name: &str) -> Option<&'a MessageDescriptor> {
        self.entries.get(type_name).copied()
    }
}

/// Classify one field as map, enum, message or scalar.
///
/// An enum field's doc (or a map's, when its values are enums) is replaced by
/// the listing of the enum's values.
pub(crate) fn resolve_field(index: &SchemaIndex, raw: &FieldDescriptor, maps: &MapEntries<'_>) -> Field {
    let mut leading_doc = raw.comments.leading.clone();

    let ty = if let Some(entry) = raw.referenced_type().and_then(|t| maps.get(t)) {
        // protoc encodes `map<K, V>` as `repeated KEntry`; undo that.
        let key = entry
            .field("key")
            .and_then(|k| ScalarKind::from_wire(k.wire_type))
            .unwrap_or(ScalarKind::String);
        let value = match entry.field("value") {
            Some(v) => {
                let (value, enum_doc) = resolve_value(index, v);
                if let Some(doc) = enum_doc {
                    leading_doc = doc;
                }
                value
            }
            None => ValueType::Scalar(ScalarKind::String),
        };
        FieldType::map(key, value)
    } else {
        let (value, enum_doc) = resolve_value(index, raw);
        if let Some(doc) = enum_doc {
            leading_doc = doc;
        }
        FieldType {
            value,
            repeated: raw.is_repeated(),
            map_key: None,
        }
    };

    Field {
        name: raw.name.clone(),
        ty,
        leading_doc,
        trailing_note: raw.comments.trailing.clone(),
    }
}

/// Element type of a field, plus the enum listing when it is an enum.
fn resolve_value(index: &SchemaIndex, raw: &FieldDescriptor) -> (ValueType, Option<String>) {
    let type_name = raw.referenced_type();

    if let Some(e) = type_name.and_then(|t| index.lookup_enum(t)) {
        return (ValueType::Enum(e.full_name.clone()), Some(e.value_listing()));
    }

    match (ScalarKind::from_wire(raw.wire_type), type_name) {
        (Some(kind), _) => (ValueType::Scalar(kind), None),
        (None, Some(name)) if raw.wire_type == WireType::Enum => {
            tracing::warn!(field = %raw.name, enum_type = %name, "enum not found in schema index");
            (ValueType::Enum(name.to_string()), None)
        }
        (None, Some(name)) => (ValueType::Message(name.to_string()), None),
        (None, None) => {
            tracing::warn!(
                field = %raw.name,
                wire_type = raw.wire_type.as_str_name(),
                "field references a type but names none; treating as string"
            );
            (ValueType::Scalar(ScalarKind::String), None)
        }
    }
}
