//! Schema index: every message and enum of a generation run, by
//! fully-qualified name.
//!
//! Methods and fields reference types declared anywhere in the request
//! (imports included), so the index is filled completely before any service
//! is resolved. Re-registering a name silently replaces the earlier entry.

use crate::model::{Enum, EnumValue, Message};
use crate::resolve::{resolve_field, MapEntries};
use apidoc_descriptor::{EnumDescriptor, FileDescriptor, MessageDescriptor};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SchemaIndex {
    messages: HashMap<String, Message>,
    enums: HashMap<String, Enum>,
}

impl SchemaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a whole request.
    ///
    /// Enums of every file go in before any message is resolved, so enum
    /// listings do not depend on file order.
    pub fn build<'a>(files: impl IntoIterator<Item = &'a FileDescriptor>) -> Self {
        let files: Vec<&FileDescriptor> = files.into_iter().collect();
        let mut index = Self::new();
        for file in &files {
            index.register_enums(file);
        }
        for file in &files {
            index.register_messages(file);
            tracing::debug!(
                file = %file.name,
                messages = index.messages.len(),
                enums = index.enums.len(),
                "indexed schema file"
            );
        }
        index
    }

    /// Register every enum and message declared in `file`, nested ones included.
    pub fn register_file(&mut self, file: &FileDescriptor) {
        self.register_enums(file);
        self.register_messages(file);
    }

    pub fn lookup_message(&self, name: &str) -> Option<&Message> {
        self.messages.get(name.trim_start_matches('.'))
    }

    pub fn lookup_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name.trim_start_matches('.'))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    fn register_enums(&mut self, file: &FileDescriptor) {
        for e in &file.enums {
            self.register_enum(e);
        }
        for m in file.all_messages() {
            for e in &m.enums {
                self.register_enum(e);
            }
        }
    }

    fn register_enum(&mut self, e: &EnumDescriptor) {
        let model = Enum {
            full_name: e.full_name.clone(),
            values: e
                .values
                .iter()
                .map(|v| EnumValue {
                    name: v.name.clone(),
                    number: v.number,
                    trailing_note: v.comments.trailing.clone(),
                })
                .collect(),
        };
        self.enums.insert(e.full_name.clone(), model);
    }

    fn register_messages(&mut self, file: &FileDescriptor) {
        for m in &file.messages {
            self.register_message(m);
        }
    }

    fn register_message(&mut self, m: &MessageDescriptor) {
        // Nested types first: a map field's entry type must be known before
        // the enclosing message's fields are resolved.
        for nested in &m.nested_messages {
            self.register_message(nested);
        }
        for e in &m.enums {
            self.register_enum(e);
        }

        let maps = MapEntries::collect(m);
        let fields = m
            .fields
            .iter()
            .map(|f| resolve_field(self, f, &maps))
            .collect();

        self.messages.insert(
            m.full_name.clone(),
            Message {
                full_name: m.full_name.clone(),
                name: m.name.clone(),
                trailing_doc: m.comments.trailing.clone(),
                fields,
            },
        );
    }
}
