//! Scientist entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stellar_core::entity::EntityKind;
use stellar_core::error::CoreError;
use stellar_core::patch::{self, Patch};
use stellar_core::types::DbId;
use stellar_core::validation::{require, ValidationError};

/// A scientist row from the `scientists` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Scientist {
    pub id: DbId,
    pub name: String,
    pub field_of_study: String,
}

/// DTO for creating a new scientist, as received from the client.
///
/// Fields stay optional here so a missing value surfaces as a
/// [`ValidationError`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateScientist {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

/// A validated scientist ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScientist {
    pub name: String,
    pub field_of_study: String,
}

impl TryFrom<CreateScientist> for NewScientist {
    type Error = ValidationError;

    fn try_from(input: CreateScientist) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require("name", input.name)?,
            field_of_study: require("field_of_study", input.field_of_study)?,
        })
    }
}

impl Scientist {
    pub fn set_name(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        self.name = require("name", value)?;
        Ok(())
    }

    pub fn set_field_of_study(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        self.field_of_study = require("field_of_study", value)?;
        Ok(())
    }

    /// Apply a partial update by field name.
    ///
    /// Unknown names are rejected before anything is assigned. A failing
    /// setter stops the update; the caller must discard the record rather
    /// than persist it.
    pub fn apply_patch(&mut self, input: &Patch) -> Result<(), CoreError> {
        patch::ensure_known_fields(EntityKind::Scientist, input)?;
        for (key, value) in input {
            match key.as_str() {
                "name" => self.set_name(patch::text(key, value)?)?,
                "field_of_study" => self.set_field_of_study(patch::text(key, value)?)?,
                _ => {
                    return Err(CoreError::UnknownField {
                        entity: EntityKind::Scientist.name(),
                        field: key.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}
