//! Static entity schema descriptors and the record model.
//!
//! Field discovery happens once, at descriptor definition: each entity type
//! carries a static table of name/kind pairs instead of being inspected at
//! runtime. The first segment of a clause path resolves against this table;
//! fields of kind [`FieldKind::Document`] hold the entity's semi-structured
//! JSON payload column.

pub mod registry;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{DataType, ScalarValue};

/// Storage kind of one entity field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Plain text column.
    String,
    /// 32-bit integer column.
    Integer,
    /// Double-precision column.
    Number,
    /// Boolean column.
    Boolean,
    /// Timestamp column (UTC).
    DateTime,
    /// Semi-structured JSON payload column.
    Document,
    /// Typed sub-object with its own descriptor.
    Nested(fn() -> &'static EntityDescriptor),
}

impl FieldKind {
    /// The semantic data type of a scalar field, `None` for document and
    /// nested fields.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            FieldKind::String => Some(DataType::String),
            FieldKind::Integer => Some(DataType::Integer),
            FieldKind::Number => Some(DataType::Number),
            FieldKind::Boolean => Some(DataType::Boolean),
            FieldKind::DateTime => Some(DataType::DateTime),
            FieldKind::Document | FieldKind::Nested(_) => None,
        }
    }
}

/// One entry in an entity's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Canonical field name.
    pub name: &'static str,
    /// Storage kind.
    pub kind: FieldKind,
}

/// Static description of one entity type.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Entity type name, unique process-wide.
    pub name: &'static str,
    /// Field table.
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    /// Looks up a field by case-insensitive name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// An entity type that can be queried.
pub trait Entity {
    /// The static field table for this type.
    fn descriptor() -> &'static EntityDescriptor;

    /// A typed snapshot of this instance, used by in-memory evaluation.
    fn record(&self) -> Record;
}

/// A field value inside a [`Record`].
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// A plain typed value.
    Scalar(ScalarValue),
    /// The semi-structured JSON payload.
    Document(Value),
    /// A typed sub-object.
    Nested(Record),
}

/// A typed snapshot of one entity instance.
///
/// Keys use the canonical descriptor casing; missing fields evaluate to
/// `Null` rather than erroring.
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar field.
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.values
            .insert(name.into(), FieldValue::Scalar(value.into()));
        self
    }

    /// Adds the document payload field.
    pub fn with_document(mut self, name: impl Into<String>, doc: Value) -> Self {
        self.values.insert(name.into(), FieldValue::Document(doc));
        self
    }

    /// Adds a typed sub-object field.
    pub fn with_nested(mut self, name: impl Into<String>, nested: Record) -> Self {
        self.values.insert(name.into(), FieldValue::Nested(nested));
        self
    }

    /// Looks up a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONTACT: EntityDescriptor = EntityDescriptor {
        name: "SchemaTestContact",
        fields: &[
            FieldDescriptor {
                name: "email",
                kind: FieldKind::String,
            },
            FieldDescriptor {
                name: "verified",
                kind: FieldKind::Boolean,
            },
        ],
    };

    #[test]
    fn test_field_lookup_is_case_insensitive() {
        assert!(CONTACT.field("Email").is_some());
        assert!(CONTACT.field("EMAIL").is_some());
        assert_eq!(CONTACT.field("email").unwrap().name, "email");
        assert!(CONTACT.field("phone").is_none());
    }

    #[test]
    fn test_field_kind_data_type() {
        assert_eq!(FieldKind::Integer.data_type(), Some(DataType::Integer));
        assert_eq!(FieldKind::Document.data_type(), None);
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new()
            .with_scalar("email", "a@b.example")
            .with_scalar("verified", true);
        assert!(matches!(
            record.get("email"),
            Some(FieldValue::Scalar(ScalarValue::Text(_)))
        ));
        assert!(record.get("missing").is_none());
    }
}
