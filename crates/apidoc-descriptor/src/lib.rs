//! Protobuf descriptor model for documentation generation.
//!
//! The schema compiler hands us descriptors in one of two shapes:
//!
//! - a binary `CodeGeneratorRequest` when we run as a `protoc` plugin, or
//! - a Buf descriptor set rendered as JSON
//!   (`buf build --as-file-descriptor-set -o descriptor.json`).
//!
//! Both are lowered to `prost_types::FileDescriptorProto` and then walked once
//! into an owned, comment-resolved tree ([`FileDescriptor`]) where every element
//! carries its fully-qualified name and its leading/trailing comments.

pub mod json;
pub mod model;
pub mod request;

pub use model::{
    Comments, EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FieldLabel, FileDescriptor,
    MessageDescriptor, MethodDescriptor, ServiceDescriptor, WireType,
};
pub use request::GenerationRequest;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("failed to parse descriptor set JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file to generate `{0}` is not part of the descriptor set")]
    MissingFile(String),
}
