use crate::types::DbId;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field was assigned an empty or null value.
    #[error(transparent)]
    InvalidField(#[from] ValidationError),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A partial update named a field the entity does not accept.
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
