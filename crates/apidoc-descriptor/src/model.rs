//! Owned, comment-resolved descriptor tree.
//!
//! `SourceCodeInfo` keeps comments out-of-line, keyed by a path of field
//! numbers and indexes into the `FileDescriptorProto`. We resolve those paths
//! once while walking so downstream code never deals with location paths.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::source_code_info::Location;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    MethodDescriptorProto, ServiceDescriptorProto, SourceCodeInfo,
};
use std::collections::HashMap;

// =============================================================================
// SourceCodeInfo paths
// =============================================================================

// FileDescriptorProto
const FILE_MESSAGE: i32 = 4;
const FILE_ENUM: i32 = 5;
const FILE_SERVICE: i32 = 6;
// DescriptorProto
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED: i32 = 3;
const MESSAGE_ENUM: i32 = 4;
// EnumDescriptorProto
const ENUM_VALUE: i32 = 2;
// ServiceDescriptorProto
const SERVICE_METHOD: i32 = 2;

/// Comments attached to one schema element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub leading: String,
    pub trailing: String,
    pub detached: Vec<String>,
}

impl Comments {
    fn from_location(loc: &Location) -> Self {
        Self {
            leading: scrub(loc.leading_comments()),
            trailing: scrub(loc.trailing_comments()),
            detached: loc
                .leading_detached_comments
                .iter()
                .map(|c| scrub(c))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.detached.is_empty()
    }
}

/// protoc keeps the space that follows `//` on every line.
fn scrub(comment: &str) -> String {
    comment.replace("\n ", "\n").trim().to_string()
}

#[derive(Debug, Default)]
struct CommentIndex {
    by_path: HashMap<Vec<i32>, Comments>,
}

impl CommentIndex {
    fn new(info: Option<&SourceCodeInfo>) -> Self {
        let mut by_path = HashMap::new();
        for loc in info.map(|i| i.location.as_slice()).unwrap_or_default() {
            let comments = Comments::from_location(loc);
            if !comments.is_empty() {
                by_path.insert(loc.path.clone(), comments);
            }
        }
        Self { by_path }
    }

    fn at(&self, path: &[i32]) -> Comments {
        self.by_path.get(path).cloned().unwrap_or_default()
    }
}

fn child_path(base: &[i32], tag: i32, index: usize) -> Vec<i32> {
    let mut path = Vec::with_capacity(base.len() + 2);
    path.extend_from_slice(base);
    path.push(tag);
    path.push(index as i32);
    path
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// Declared protobuf field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl From<Type> for WireType {
    fn from(t: Type) -> Self {
        match t {
            Type::Double => Self::Double,
            Type::Float => Self::Float,
            Type::Int64 => Self::Int64,
            Type::Uint64 => Self::Uint64,
            Type::Int32 => Self::Int32,
            Type::Fixed64 => Self::Fixed64,
            Type::Fixed32 => Self::Fixed32,
            Type::Bool => Self::Bool,
            Type::String => Self::String,
            Type::Group => Self::Group,
            Type::Message => Self::Message,
            Type::Bytes => Self::Bytes,
            Type::Uint32 => Self::Uint32,
            Type::Enum => Self::Enum,
            Type::Sfixed32 => Self::Sfixed32,
            Type::Sfixed64 => Self::Sfixed64,
            Type::Sint32 => Self::Sint32,
            Type::Sint64 => Self::Sint64,
        }
    }
}

impl WireType {
    /// The descriptor enum name, e.g. `TYPE_STRING`.
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Double => "TYPE_DOUBLE",
            Self::Float => "TYPE_FLOAT",
            Self::Int64 => "TYPE_INT64",
            Self::Uint64 => "TYPE_UINT64",
            Self::Int32 => "TYPE_INT32",
            Self::Fixed64 => "TYPE_FIXED64",
            Self::Fixed32 => "TYPE_FIXED32",
            Self::Bool => "TYPE_BOOL",
            Self::String => "TYPE_STRING",
            Self::Group => "TYPE_GROUP",
            Self::Message => "TYPE_MESSAGE",
            Self::Bytes => "TYPE_BYTES",
            Self::Uint32 => "TYPE_UINT32",
            Self::Enum => "TYPE_ENUM",
            Self::Sfixed32 => "TYPE_SFIXED32",
            Self::Sfixed64 => "TYPE_SFIXED64",
            Self::Sint32 => "TYPE_SINT32",
            Self::Sint64 => "TYPE_SINT64",
        }
    }

    pub fn references_type(self) -> bool {
        matches!(self, Self::Message | Self::Group | Self::Enum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldLabel {
    #[default]
    Optional,
    Required,
    Repeated,
}

impl From<Label> for FieldLabel {
    fn from(label: Label) -> Self {
        match label {
            Label::Optional => Self::Optional,
            Label::Required => Self::Required,
            Label::Repeated => Self::Repeated,
        }
    }
}

// =============================================================================
// Descriptor tree
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct FileDescriptor {
    pub name: String,
    pub package: String,
    pub dependencies: Vec<String>,
    pub comments: Comments,
    pub messages: Vec<MessageDescriptor>,
    pub enums: Vec<EnumDescriptor>,
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct MessageDescriptor {
    pub name: String,
    pub full_name: String,
    pub comments: Comments,
    pub fields: Vec<FieldDescriptor>,
    pub nested_messages: Vec<MessageDescriptor>,
    pub enums: Vec<EnumDescriptor>,
    pub map_entry: bool,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: i32,
    pub label: FieldLabel,
    pub wire_type: WireType,
    /// Referenced message/enum as declared (leading dot included).
    pub type_name: Option<String>,
    pub comments: Comments,
}

#[derive(Debug, Clone, Default)]
pub struct EnumDescriptor {
    pub name: String,
    pub full_name: String,
    pub comments: Comments,
    pub values: Vec<EnumValueDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumValueDescriptor {
    pub name: String,
    pub number: i32,
    pub comments: Comments,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceDescriptor {
    pub name: String,
    pub full_name: String,
    pub comments: Comments,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct MethodDescriptor {
    pub name: String,
    pub full_name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comments: Comments,
}

impl FileDescriptor {
    pub fn from_proto(file: &FileDescriptorProto) -> Self {
        let comments = CommentIndex::new(file.source_code_info.as_ref());
        let package = file.package().to_string();

        let messages = file
            .message_type
            .iter()
            .enumerate()
            .map(|(i, m)| {
                MessageDescriptor::walk(&package, m, child_path(&[], FILE_MESSAGE, i), &comments)
            })
            .collect();
        let enums = file
            .enum_type
            .iter()
            .enumerate()
            .map(|(i, e)| EnumDescriptor::walk(&package, e, child_path(&[], FILE_ENUM, i), &comments))
            .collect();
        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ServiceDescriptor::walk(&package, s, child_path(&[], FILE_SERVICE, i), &comments)
            })
            .collect();

        Self {
            name: file.name().to_string(),
            package,
            dependencies: file.dependency.clone(),
            // comments on the `package` statement
            comments: comments.at(&[2]),
            messages,
            enums,
            services,
        }
    }

    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }

    /// Every message declared in this file, nested ones included, parents first.
    pub fn all_messages(&self) -> Vec<&MessageDescriptor> {
        fn collect<'a>(m: &'a MessageDescriptor, out: &mut Vec<&'a MessageDescriptor>) {
            out.push(m);
            for nested in &m.nested_messages {
                collect(nested, out);
            }
        }
        let mut out = Vec::new();
        for m in &self.messages {
            collect(m, &mut out);
        }
        out
    }
}

impl MessageDescriptor {
    fn walk(scope: &str, m: &DescriptorProto, path: Vec<i32>, comments: &CommentIndex) -> Self {
        let name = m.name().to_string();
        let full_name = qualify(scope, &name);

        let fields = m
            .field
            .iter()
            .enumerate()
            .map(|(i, f)| FieldDescriptor::walk(f, child_path(&path, MESSAGE_FIELD, i), comments))
            .collect();
        let nested_messages = m
            .nested_type
            .iter()
            .enumerate()
            .map(|(i, n)| Self::walk(&full_name, n, child_path(&path, MESSAGE_NESTED, i), comments))
            .collect();
        let enums = m
            .enum_type
            .iter()
            .enumerate()
            .map(|(i, e)| {
                EnumDescriptor::walk(&full_name, e, child_path(&path, MESSAGE_ENUM, i), comments)
            })
            .collect();

        Self {
            name,
            full_name,
            comments: comments.at(&path),
            fields,
            nested_messages,
            enums,
            map_entry: m.options.as_ref().is_some_and(|o| o.map_entry()),
        }
    }

    /// Whether this is the synthetic `XxxEntry` type protoc generates for a
    /// `map<K, V>` field.
    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl FieldDescriptor {
    fn walk(f: &FieldDescriptorProto, path: Vec<i32>, comments: &CommentIndex) -> Self {
        Self {
            name: f.name().to_string(),
            number: f.number(),
            label: f.label().into(),
            wire_type: f.r#type().into(),
            type_name: f.type_name.clone().filter(|t| !t.is_empty()),
            comments: comments.at(&path),
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.label == FieldLabel::Repeated
    }

    /// Fully-qualified referenced type without the leading dot.
    pub fn referenced_type(&self) -> Option<&str> {
        self.type_name
            .as_deref()
            .map(|t| t.trim_start_matches('.'))
            .filter(|t| !t.is_empty())
    }
}

impl EnumDescriptor {
    fn walk(scope: &str, e: &EnumDescriptorProto, path: Vec<i32>, comments: &CommentIndex) -> Self {
        let name = e.name().to_string();
        let values = e
            .value
            .iter()
            .enumerate()
            .map(|(i, v)| EnumValueDescriptor {
                name: v.name().to_string(),
                number: v.number(),
                comments: comments.at(&child_path(&path, ENUM_VALUE, i)),
            })
            .collect();
        Self {
            full_name: qualify(scope, &name),
            name,
            comments: comments.at(&path),
            values,
        }
    }
}

impl ServiceDescriptor {
    fn walk(
        package: &str,
        s: &ServiceDescriptorProto,
        path: Vec<i32>,
        comments: &CommentIndex,
    ) -> Self {
        let name = s.name().to_string();
        let full_name = qualify(package, &name);
        let methods = s
            .method
            .iter()
            .enumerate()
            .map(|(i, m)| {
                MethodDescriptor::walk(&full_name, m, child_path(&path, SERVICE_METHOD, i), comments)
            })
            .collect();
        Self {
            name,
            full_name,
            comments: comments.at(&path),
            methods,
        }
    }
}

impl MethodDescriptor {
    fn walk(
        service: &str,
        m: &MethodDescriptorProto,
        path: Vec<i32>,
        comments: &CommentIndex,
    ) -> Self {
        let name = m.name().to_string();
        Self {
            full_name: qualify(service, &name),
            name,
            input_type: m.input_type().to_string(),
            output_type: m.output_type().to_string(),
            client_streaming: m.client_streaming(),
            server_streaming: m.server_streaming(),
            comments: comments.at(&path),
        }
    }
}
