//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO carrying the raw request fields
//! - For entities with required fields, a validated insert struct built
//!   from the create DTO with `TryFrom`
//! - `apply_patch`, the field-name to typed-setter mapping used by partial
//!   updates

pub mod mission;
pub mod planet;
pub mod scientist;
