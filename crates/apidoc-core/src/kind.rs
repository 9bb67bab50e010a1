//! Scalar type classification: display labels and zero/sample literals.

use apidoc_descriptor::WireType;

/// Scalar kinds as they appear in example payloads.
///
/// Several wire encodings collapse onto one kind (`sint32`, `sfixed32` are
/// `Int32`; `fixed64` is `Uint64`, ...) because the JSON shape is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Bytes,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Double,
    Float,
    Bool,
}

impl ScalarKind {
    /// `None` for wire types that reference a message or enum.
    pub fn from_wire(wire: WireType) -> Option<Self> {
        let kind = match wire {
            WireType::String => Self::String,
            WireType::Bytes => Self::Bytes,
            WireType::Int32 | WireType::Sint32 | WireType::Sfixed32 => Self::Int32,
            WireType::Uint32 | WireType::Fixed32 => Self::Uint32,
            WireType::Int64 | WireType::Sint64 | WireType::Sfixed64 => Self::Int64,
            WireType::Uint64 | WireType::Fixed64 => Self::Uint64,
            WireType::Double => Self::Double,
            WireType::Float => Self::Float,
            WireType::Bool => Self::Bool,
            WireType::Message | WireType::Group | WireType::Enum => return None,
        };
        Some(kind)
    }

    /// Human-readable label used inside `// type:<...>` annotations.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bytes => "string(bytes)",
            Self::Double | Self::Float => "float",
            Self::Bool => "bool",
            Self::Int64 | Self::Uint64 => "string(int64)",
            Self::Int32 | Self::Uint32 => "int",
        }
    }

    /// Example literal for a single value. 64-bit integers are quoted, as in
    /// the protobuf JSON mapping.
    pub fn zero_literal(self) -> &'static str {
        match self {
            Self::String | Self::Bytes => r#""""#,
            Self::Double | Self::Float => "0.0",
            Self::Bool => "false",
            Self::Int64 | Self::Uint64 => r#""0""#,
            Self::Int32 | Self::Uint32 => "0",
        }
    }

    /// Text placed between the quotes of a map key.
    pub fn key_literal(self) -> &'static str {
        match self {
            Self::String | Self::Bytes => "",
            Self::Double | Self::Float => "0.0",
            Self::Bool => "false",
            Self::Int64 | Self::Uint64 | Self::Int32 | Self::Uint32 => "0",
        }
    }
}
