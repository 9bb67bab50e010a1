//! Markdown API documentation for protobuf services.
//!
//! A generation run goes through three passes:
//!
//! - **scan**: every message and enum of the request (imports included) is
//!   indexed by fully-qualified name ([`SchemaIndex`]);
//! - **resolve**: each service method becomes an [`Api`] record with rendered
//!   request/reply examples ([`ServiceCatalog`]);
//! - **assemble**: the catalogs of each schema file are rendered into one
//!   Markdown document ([`markdown::render_document`]).
//!
//! Example values look like a script object literal, one line per field with a
//! `// type:<...>` annotation:
//!
//! ```text
//! {
//!     // Who to greet.
//!     name: "", // type:<string>
//!     tags: ["", ""], // type:<string>
//! }
//! ```

pub mod beautify;
pub mod catalog;
pub mod error;
pub mod generate;
pub mod index;
pub mod kind;
pub mod markdown;
pub mod model;
pub mod params;
pub mod render;
mod resolve;

#[cfg(test)]
mod test_support;

pub use beautify::beautify;
pub use catalog::{Api, ServiceCatalog, HTTP_METHOD};
pub use error::{ConfigError, ParamError};
pub use generate::{generate_request, output_name, GeneratedFile, Generator};
pub use index::SchemaIndex;
pub use kind::ScalarKind;
pub use markdown::{anchor_for, render_document};
pub use model::{Enum, EnumValue, Field, FieldType, Message, ValueType};
pub use params::CommandLineParams;
pub use render::{Example, Renderer};
