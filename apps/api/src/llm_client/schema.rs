//! Schema descriptors: explicit shapes for flow requests and model responses.
//!
//! A descriptor is checked by [`SchemaDescriptor::validate`] against a
//! `serde_json::Value`, independent of how the value reached us. The same
//! descriptor renders the JSON Schema handed to the model as its
//! structured-output constraint, so the constraint and the check cannot drift.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// The value shapes a field can take. Every flow payload is built from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string, including the empty string.
    Text,
    /// A string with at least one non-whitespace character.
    NonEmptyText,
    /// An array of strings, possibly empty.
    TextList,
    /// An array of strings with at least one element.
    NonEmptyTextList,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::NonEmptyText => "a non-empty string",
            FieldKind::TextList => "an array of strings",
            FieldKind::NonEmptyTextList => "a non-empty array of strings",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

/// A flat object schema. Every listed field is required; unlisted keys are
/// tolerated and dropped on deserialization.
#[derive(Debug)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field '{field}[{index}]' must be a string, got {found}")]
    WrongElementType {
        field: &'static str,
        index: usize,
        found: &'static str,
    },

    #[error("field '{0}' must not be empty")]
    Empty(&'static str),
}

impl SchemaDescriptor {
    /// Checks that `value` is an object carrying every field with the right shape.
    /// Stops at the first violation, in field declaration order.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaViolation::NotAnObject(json_type_name(value)))?;

        for field in self.fields {
            let found = object
                .get(field.name)
                .ok_or(SchemaViolation::MissingField(field.name))?;
            check_field(field, found)?;
        }

        Ok(())
    }

    /// Renders the descriptor as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            let property = match field.kind {
                FieldKind::Text => json!({ "type": "string", "description": field.description }),
                FieldKind::NonEmptyText => json!({
                    "type": "string",
                    "minLength": 1,
                    "description": field.description
                }),
                FieldKind::TextList => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": field.description
                }),
                FieldKind::NonEmptyTextList => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "description": field.description
                }),
            };
            properties.insert(field.name.to_string(), property);
        }

        let required: Vec<&str> = self.fields.iter().map(|f| f.name).collect();

        json!({
            "type": "object",
            "description": self.description,
            "properties": properties,
            "required": required
        })
    }
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<(), SchemaViolation> {
    let wrong_type = || SchemaViolation::WrongType {
        field: field.name,
        expected: field.kind.expected(),
        found: json_type_name(value),
    };

    match field.kind {
        FieldKind::Text => {
            value.as_str().ok_or_else(wrong_type)?;
        }
        FieldKind::NonEmptyText => {
            let text = value.as_str().ok_or_else(wrong_type)?;
            if text.trim().is_empty() {
                return Err(SchemaViolation::Empty(field.name));
            }
        }
        FieldKind::TextList | FieldKind::NonEmptyTextList => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            if let Some((index, item)) = items.iter().enumerate().find(|(_, v)| !v.is_string()) {
                return Err(SchemaViolation::WrongElementType {
                    field: field.name,
                    index,
                    found: json_type_name(item),
                });
            }
            if field.kind == FieldKind::NonEmptyTextList && items.is_empty() {
                return Err(SchemaViolation::Empty(field.name));
            }
        }
    }

    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
