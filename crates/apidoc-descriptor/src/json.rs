//! Buf descriptor sets rendered as JSON.
//!
//! `buf build --as-file-descriptor-set -o descriptor.json` writes the
//! `google.protobuf.FileDescriptorSet` in its canonical JSON mapping: camelCase
//! keys, enum values as their names (`"TYPE_STRING"`), options as objects.
//! We parse the subset we need and lower it to `prost_types` so the plugin path
//! and the JSON path share one walker.

use crate::DescriptorError;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::source_code_info::Location;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MessageOptions, MethodDescriptorProto, ServiceDescriptorProto,
    SourceCodeInfo,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse a descriptor set JSON document into raw file descriptors.
pub fn parse_descriptor_set_json(text: &str) -> Result<Vec<FileDescriptorProto>, DescriptorError> {
    let set: FileDescriptorSetJson = serde_json::from_str(text)?;
    Ok(set.file.into_iter().map(FileDescriptorProtoJson::into_proto).collect())
}

// =============================================================================
// Descriptor JSON (subset)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct FileDescriptorSetJson {
    #[serde(default)]
    file: Vec<FileDescriptorProtoJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct FileDescriptorProtoJson {
    name: Option<String>,
    package: Option<String>,
    #[serde(default)]
    dependency: Vec<String>,
    #[serde(default, rename = "messageType")]
    message_type: Vec<DescriptorProtoJson>,
    #[serde(default, rename = "enumType")]
    enum_type: Vec<EnumDescriptorProtoJson>,
    #[serde(default)]
    service: Vec<ServiceDescriptorProtoJson>,
    #[serde(default, rename = "sourceCodeInfo")]
    source_code_info: Option<SourceCodeInfoJson>,
    syntax: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DescriptorProtoJson {
    name: Option<String>,
    #[serde(default)]
    field: Vec<FieldDescriptorProtoJson>,
    #[serde(default, rename = "nestedType")]
    nested_type: Vec<DescriptorProtoJson>,
    #[serde(default, rename = "enumType")]
    enum_type: Vec<EnumDescriptorProtoJson>,
    #[serde(default)]
    options: Option<OptionsJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct FieldDescriptorProtoJson {
    name: Option<String>,
    number: Option<i32>,
    label: Option<EnumJson>,
    #[serde(rename = "type")]
    typ: Option<EnumJson>,
    #[serde(rename = "typeName")]
    type_name: Option<String>,
    #[serde(rename = "jsonName")]
    json_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EnumDescriptorProtoJson {
    name: Option<String>,
    #[serde(default)]
    value: Vec<EnumValueDescriptorProtoJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct EnumValueDescriptorProtoJson {
    name: Option<String>,
    number: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceDescriptorProtoJson {
    name: Option<String>,
    #[serde(default)]
    method: Vec<MethodDescriptorProtoJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct MethodDescriptorProtoJson {
    name: Option<String>,
    #[serde(rename = "inputType")]
    input_type: Option<String>,
    #[serde(rename = "outputType")]
    output_type: Option<String>,
    #[serde(rename = "clientStreaming")]
    client_streaming: Option<bool>,
    #[serde(rename = "serverStreaming")]
    server_streaming: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct SourceCodeInfoJson {
    #[serde(default)]
    location: Vec<LocationJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationJson {
    #[serde(default)]
    path: Vec<i32>,
    #[serde(default)]
    span: Vec<i32>,
    #[serde(rename = "leadingComments")]
    leading_comments: Option<String>,
    #[serde(rename = "trailingComments")]
    trailing_comments: Option<String>,
    #[serde(default, rename = "leadingDetachedComments")]
    leading_detached_comments: Vec<String>,
}

/// Enum fields are names in canonical JSON; some tools emit the number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EnumJson {
    Name(String),
    Number(i32),
}

impl EnumJson {
    fn label(&self) -> Option<i32> {
        match self {
            Self::Name(name) => Label::from_str_name(name).map(|l| l as i32),
            Self::Number(n) => Some(*n),
        }
    }

    fn field_type(&self) -> Option<i32> {
        match self {
            Self::Name(name) => Type::from_str_name(name).map(|t| t as i32),
            Self::Number(n) => Some(*n),
        }
    }
}

type OptionsJson = BTreeMap<String, Value>;

// =============================================================================
// Lowering to prost_types
// =============================================================================

impl FileDescriptorProtoJson {
    fn into_proto(self) -> FileDescriptorProto {
        FileDescriptorProto {
            name: self.name,
            package: self.package,
            dependency: self.dependency,
            message_type: self
                .message_type
                .into_iter()
                .map(DescriptorProtoJson::into_proto)
                .collect(),
            enum_type: self
                .enum_type
                .into_iter()
                .map(EnumDescriptorProtoJson::into_proto)
                .collect(),
            service: self
                .service
                .into_iter()
                .map(ServiceDescriptorProtoJson::into_proto)
                .collect(),
            source_code_info: self.source_code_info.map(|sci| SourceCodeInfo {
                location: sci.location.into_iter().map(LocationJson::into_proto).collect(),
            }),
            syntax: self.syntax,
            ..Default::default()
        }
    }
}

impl DescriptorProtoJson {
    fn into_proto(self) -> DescriptorProto {
        let map_entry = self
            .options
            .as_ref()
            .and_then(|opts| opts.get("mapEntry"))
            .and_then(Value::as_bool);
        DescriptorProto {
            name: self.name,
            field: self
                .field
                .into_iter()
                .map(FieldDescriptorProtoJson::into_proto)
                .collect(),
            nested_type: self.nested_type.into_iter().map(Self::into_proto).collect(),
            enum_type: self
                .enum_type
                .into_iter()
                .map(EnumDescriptorProtoJson::into_proto)
                .collect(),
            options: map_entry.map(|map_entry| MessageOptions {
                map_entry: Some(map_entry),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl FieldDescriptorProtoJson {
    fn into_proto(self) -> FieldDescriptorProto {
        let mut r#type = self.typ.as_ref().and_then(EnumJson::field_type);
        if r#type.is_none() && self.type_name.is_some() {
            r#type = Some(Type::Message as i32);
        }
        FieldDescriptorProto {
            name: self.name,
            number: self.number,
            label: self.label.as_ref().and_then(EnumJson::label),
            r#type,
            type_name: self.type_name,
            json_name: self.json_name,
            ..Default::default()
        }
    }
}

impl EnumDescriptorProtoJson {
    fn into_proto(self) -> EnumDescriptorProto {
        EnumDescriptorProto {
            name: self.name,
            value: self
                .value
                .into_iter()
                .map(|v| EnumValueDescriptorProto {
                    name: v.name,
                    number: v.number,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}

impl ServiceDescriptorProtoJson {
    fn into_proto(self) -> ServiceDescriptorProto {
        ServiceDescriptorProto {
            name: self.name,
            method: self
                .method
                .into_iter()
                .map(|m| MethodDescriptorProto {
                    name: m.name,
                    input_type: m.input_type,
                    output_type: m.output_type,
                    client_streaming: m.client_streaming,
                    server_streaming: m.server_streaming,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}

impl LocationJson {
    fn into_proto(self) -> Location {
        Location {
            path: self.path,
            span: self.span,
            leading_comments: self.leading_comments,
            trailing_comments: self.trailing_comments,
            leading_detached_comments: self.leading_detached_comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileDescriptor, WireType};

    const DESCRIPTOR: &str = r#"{
      "file": [{
        "name": "inventory.proto",
        "package": "inventory",
        "messageType": [{
          "name": "Stock",
          "field": [
            {"name": "sku", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING", "jsonName": "sku"},
            {"name": "levels", "number": 2, "label": "LABEL_REPEATED", "type": "TYPE_MESSAGE",
             "typeName": ".inventory.Stock.LevelsEntry", "jsonName": "levels"},
            {"name": "count", "number": 3, "label": 1, "type": 5}
          ],
          "nestedType": [{
            "name": "LevelsEntry",
            "field": [
              {"name": "key", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"},
              {"name": "value", "number": 2, "label": "LABEL_OPTIONAL", "type": "TYPE_INT64"}
            ],
            "options": {"mapEntry": true}
          }]
        }],
        "service": [{
          "name": "Warehouse",
          "method": [{"name": "Check", "inputType": ".inventory.Stock", "outputType": ".inventory.Stock"}]
        }],
        "sourceCodeInfo": {"location": [
          {"path": [4, 0, 2, 0], "span": [3, 2, 17], "leadingComments": " Stock keeping unit.\n"},
          {"path": [6, 0], "span": [8, 0, 10, 1], "leadingComments": " Warehouse queries.\n"}
        ]}
      }]
    }"#;

    #[test]
    fn parses_buf_json_descriptor_set() {
        let files = parse_descriptor_set_json(DESCRIPTOR).expect("parse");
        assert_eq!(files.len(), 1);

        let file = FileDescriptor::from_proto(&files[0]);
        let stock = &file.messages[0];
        assert_eq!(stock.fields[0].wire_type, WireType::String);
        assert_eq!(stock.fields[0].comments.leading, "Stock keeping unit.");
        assert!(stock.fields[1].is_repeated());
        assert!(stock.nested_messages[0].is_map_entry());
        assert_eq!(file.services[0].comments.leading, "Warehouse queries.");
    }

    #[test]
    fn accepts_numeric_enum_values() {
        let files = parse_descriptor_set_json(DESCRIPTOR).expect("parse");
        let file = FileDescriptor::from_proto(&files[0]);
        let count = &file.messages[0].fields[2];
        assert_eq!(count.wire_type, WireType::Int32);
        assert!(!count.is_repeated());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_descriptor_set_json("{\"file\": [").expect_err("should fail");
        assert!(matches!(err, DescriptorError::Json(_)));
    }
}
