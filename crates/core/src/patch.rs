//! Decoding helpers for partial updates.
//!
//! A PATCH body is a JSON object mapping field names to new values. Each
//! entity maps the names it accepts onto typed setters; these helpers do
//! the name check and the JSON-to-Rust conversion those setters need.

use serde_json::{Map, Value};

use crate::entity::EntityKind;
use crate::error::CoreError;
use crate::types::DbId;

/// A decoded PATCH body.
pub type Patch = Map<String, Value>;

/// Reject the whole patch if it names any field the entity does not accept.
///
/// Runs before any setter so an unknown key never leaves a half-applied
/// record behind. The primary key is read-only and is rejected as well.
pub fn ensure_known_fields(kind: EntityKind, patch: &Patch) -> Result<(), CoreError> {
    match patch
        .keys()
        .find(|key| !kind.writable_fields().any(|f| f == key.as_str()))
    {
        Some(key) => Err(CoreError::UnknownField {
            entity: kind.name(),
            field: key.clone(),
        }),
        None => Ok(()),
    }
}

/// Decode a nullable text value.
pub fn text(field: &str, value: &Value) -> Result<Option<String>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(type_mismatch(field, "a string", other)),
    }
}

/// Decode a nullable integer value.
pub fn integer(field: &str, value: &Value) -> Result<Option<i64>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| type_mismatch(field, "an integer", value)),
        other => Err(type_mismatch(field, "an integer", other)),
    }
}

/// Decode a nullable foreign key.
pub fn id(field: &str, value: &Value) -> Result<Option<DbId>, CoreError> {
    integer(field, value)
}

fn type_mismatch(field: &str, expected: &str, got: &Value) -> CoreError {
    let got = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    CoreError::Validation(format!("Field '{field}' must be {expected}, got {got}"))
}
