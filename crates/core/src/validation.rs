//! Field-level guards for required columns.
//!
//! Every watched field runs through [`require`] when it is assigned, both
//! at construction and on partial update. A value that is absent, empty or
//! zero is rejected; anything else passes through untouched.

use validator::{ValidateLength, ValidateRange};

use crate::types::DbId;

/// Message carried by every required-field failure.
pub const REQUIRED_MESSAGE: &str = "All fields must be filled";

/// A required field was assigned an empty or null value.
///
/// No distinction is made between a missing value and an empty one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: All fields must be filled")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

/// Truthiness check for values stored in required columns.
pub trait Filled {
    fn is_filled(&self) -> bool;
}

impl Filled for String {
    fn is_filled(&self) -> bool {
        self.validate_length(Some(1_u64), None, None)
    }
}

/// Ids are BIGSERIAL, so only strictly positive values can reference a row.
impl Filled for DbId {
    fn is_filled(&self) -> bool {
        self.validate_range(Some(1_i64), None, None, None)
    }
}

/// Guard a single field assignment.
///
/// Returns the value unchanged when it is filled, otherwise a
/// [`ValidationError`] naming the field. Callers assign the returned value,
/// so a failed guard leaves the target untouched.
pub fn require<T: Filled>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    match value {
        Some(v) if v.is_filled() => Ok(v),
        _ => Err(ValidationError::new(field)),
    }
}
