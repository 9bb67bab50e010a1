//! Example-value renderer.
//!
//! Turns a resolved message into a script-like object literal: one line per
//! field, `name: <example>, // type:<label>`, with the field's leading doc as
//! `//` lines above it. Message-typed fields expand recursively and carry no
//! `type:` annotation; repeated/map message fields get an inline marker
//! comment instead.
//!
//! Unknown message references render as an empty object. A message that is
//! already being expanded further up the stack renders as an empty object with
//! a `// recursive:<Name>` marker, so self-referential schemas terminate.

use crate::index::SchemaIndex;
use crate::model::{short_name, Field, FieldType, Message, ValueType};

const ENUM_LABEL: &str = "string(enum)";
const ENUM_ZERO: &str = r#""""#;

/// Example text for one field value, plus its `type:` label.
///
/// `annotation` is `None` for message-typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub value: String,
    pub annotation: Option<String>,
}

pub struct Renderer<'a> {
    index: &'a SchemaIndex,
    /// Messages currently being expanded, outermost first.
    stack: Vec<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self {
            index,
            stack: Vec::new(),
        }
    }

    /// Brace-delimited object literal for `message`, `{\n}` when absent.
    pub fn render_message(&mut self, message: Option<&Message>) -> String {
        let mut out = String::from("{\n");
        if let Some(message) = message {
            self.stack.push(message.full_name.clone());
            for field in &message.fields {
                out.push_str(&self.render_field(field));
            }
            self.stack.pop();
        }
        out.push('}');
        out
    }

    /// Render a message by fully-qualified name (leading dot allowed).
    pub fn render_named(&mut self, full_name: &str) -> String {
        let full_name = full_name.trim_start_matches('.');
        if self.stack.iter().any(|n| n == full_name) {
            tracing::debug!(message = %full_name, "recursive message reference; not expanding");
            return format!("{{\n// recursive:<{}>\n}}", self.display_name(full_name));
        }
        let index = self.index;
        let message = index.lookup_message(full_name);
        if message.is_none() {
            tracing::warn!(message = %full_name, "message not found in schema index; rendering empty object");
        }
        self.render_message(message)
    }

    /// One field: doc comment lines, then the `name: value,` line.
    pub fn render_field(&mut self, field: &Field) -> String {
        let mut out = String::new();
        if !field.leading_doc.is_empty() {
            for line in field.leading_doc.split('\n') {
                out.push_str(format!("// {line}").trim_end());
                out.push('\n');
            }
        }

        let example = self.render_value(field);
        let line = match example.annotation {
            None => format!("{}: {},", field.name, example.value),
            Some(annotation) => {
                let mut line = format!("{}: {}, // type:<{annotation}>", field.name, example.value);
                if !field.trailing_note.is_empty() {
                    line.push_str(", ");
                    line.push_str(&one_line(&field.trailing_note));
                }
                line
            }
        };
        out.push_str(line.trim_matches(' '));
        out.push('\n');
        out
    }

    pub fn render_value(&mut self, field: &Field) -> Example {
        match &field.ty.value {
            ValueType::Scalar(kind) => {
                shaped_literal(kind.zero_literal(), kind.display_name(), &field.ty)
            }
            ValueType::Enum(_) => shaped_literal(ENUM_ZERO, ENUM_LABEL, &field.ty),
            ValueType::Message(name) => {
                let object = self.render_named(name);
                let display = self.display_name(name);
                let value = if let Some(key) = field.ty.map_key {
                    let marker = marker(&field.trailing_note, || {
                        format!("type:<map<{},{display}>>", key.display_name())
                    });
                    format!("{{// {marker}\n\"{}\":{object}}}", key.key_literal())
                } else if field.ty.repeated {
                    let marker =
                        marker(&field.trailing_note, || format!("type:<list<{display}>>"));
                    format!("[// {marker}\n{object}]")
                } else {
                    object
                };
                Example {
                    value,
                    annotation: None,
                }
            }
        }
    }

    fn display_name<'n>(&self, full_name: &'n str) -> &'n str
    where
        'a: 'n,
    {
        let index: &'a SchemaIndex = self.index;
        index
            .lookup_message(full_name)
            .map(|m| m.name.as_str())
            .unwrap_or_else(|| short_name(full_name))
    }
}

/// Render a message with a fresh renderer.
pub fn render_message(index: &SchemaIndex, message: Option<&Message>) -> String {
    Renderer::new(index).render_message(message)
}

fn shaped_literal(zero: &str, label: &str, ty: &FieldType) -> Example {
    let (value, annotation) = match ty.map_key {
        Some(key) => (
            format!("{{\"{}\":{zero}}}", key.key_literal()),
            format!("map<{},{label}>", key.display_name()),
        ),
        None if ty.repeated => (format!("[{zero},{zero}]"), label.to_string()),
        None => (zero.to_string(), label.to_string()),
    };
    Example {
        value,
        annotation: Some(annotation),
    }
}

fn marker(note: &str, default: impl FnOnce() -> String) -> String {
    if note.is_empty() {
        default()
    } else {
        one_line(note)
    }
}

fn one_line(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join(" ")
}
