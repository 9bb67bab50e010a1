//! Descriptor builders for unit tests.

pub use apidoc_descriptor::{
    Comments, EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FieldLabel, FileDescriptor,
    MessageDescriptor, MethodDescriptor, ServiceDescriptor, WireType,
};

use crate::index::SchemaIndex;

fn short(full_name: &str) -> String {
    full_name.rsplit('.').next().unwrap_or(full_name).to_string()
}

fn scope(full_name: &str) -> &str {
    full_name.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
}

pub fn file(
    name: &str,
    package: &str,
    messages: Vec<MessageDescriptor>,
    enums: Vec<EnumDescriptor>,
) -> FileDescriptor {
    FileDescriptor {
        name: name.to_string(),
        package: package.to_string(),
        messages,
        enums,
        ..Default::default()
    }
}

pub fn message(full_name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    MessageDescriptor {
        name: short(full_name),
        full_name: full_name.to_string(),
        fields,
        ..Default::default()
    }
}

pub trait MessageBuilder {
    fn with_nested(self, nested: MessageDescriptor) -> Self;
    fn with_enum(self, e: EnumDescriptor) -> Self;
}

impl MessageBuilder for MessageDescriptor {
    fn with_nested(mut self, nested: MessageDescriptor) -> Self {
        self.nested_messages.push(nested);
        self
    }

    fn with_enum(mut self, e: EnumDescriptor) -> Self {
        self.enums.push(e);
        self
    }
}

pub fn scalar(name: &str, wire_type: WireType) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        number: 1,
        label: FieldLabel::Optional,
        wire_type,
        type_name: None,
        comments: Comments::default(),
    }
}

pub fn message_field(name: &str, type_name: &str) -> FieldDescriptor {
    FieldDescriptor {
        wire_type: WireType::Message,
        type_name: Some(format!(".{}", type_name.trim_start_matches('.'))),
        ..scalar(name, WireType::Message)
    }
}

pub fn enum_field(name: &str, type_name: &str) -> FieldDescriptor {
    FieldDescriptor {
        wire_type: WireType::Enum,
        type_name: Some(format!(".{}", type_name.trim_start_matches('.'))),
        ..scalar(name, WireType::Enum)
    }
}

pub fn repeated(mut field: FieldDescriptor) -> FieldDescriptor {
    field.label = FieldLabel::Repeated;
    field
}

pub fn with_doc(mut field: FieldDescriptor, leading: &str, trailing: &str) -> FieldDescriptor {
    field.comments.leading = leading.to_string();
    field.comments.trailing = trailing.to_string();
    field
}

/// A `map<key, value>` field on `owner` plus the synthetic entry type protoc
/// would nest inside `owner`. `value` should be named `value`.
pub fn map_field(
    owner: &str,
    name: &str,
    key: WireType,
    value: FieldDescriptor,
) -> (FieldDescriptor, MessageDescriptor) {
    let entry_name = format!("{}Entry", camel(name));
    let entry_full_name = format!("{owner}.{entry_name}");
    let mut entry = message(&entry_full_name, vec![scalar("key", key), value]);
    entry.map_entry = true;
    (repeated(message_field(name, &entry_full_name)), entry)
}

fn camel(snake: &str) -> String {
    snake
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn enumeration(full_name: &str, values: &[(&str, i32, &str)]) -> EnumDescriptor {
    EnumDescriptor {
        name: short(full_name),
        full_name: full_name.to_string(),
        comments: Comments::default(),
        values: values
            .iter()
            .map(|(name, number, note)| EnumValueDescriptor {
                name: (*name).to_string(),
                number: *number,
                comments: Comments {
                    trailing: (*note).to_string(),
                    ..Default::default()
                },
            })
            .collect(),
    }
}

/// `methods`: `(name, input, output, leading doc)`.
pub fn service(full_name: &str, doc: &str, methods: &[(&str, &str, &str, &str)]) -> ServiceDescriptor {
    ServiceDescriptor {
        name: short(full_name),
        full_name: full_name.to_string(),
        comments: Comments {
            leading: doc.to_string(),
            ..Default::default()
        },
        methods: methods
            .iter()
            .map(|(name, input, output, doc)| MethodDescriptor {
                name: (*name).to_string(),
                full_name: format!("{full_name}.{name}"),
                input_type: (*input).to_string(),
                output_type: (*output).to_string(),
                comments: Comments {
                    leading: (*doc).to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect(),
    }
}

/// Index of a single file holding `messages`, package taken from the first.
pub fn index_of(messages: Vec<MessageDescriptor>) -> SchemaIndex {
    let package = messages.first().map(|m| scope(&m.full_name).to_string()).unwrap_or_default();
    SchemaIndex::build([&file("test.proto", &package, messages, vec![])])
}
