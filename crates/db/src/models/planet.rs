//! Planet entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stellar_core::entity::EntityKind;
use stellar_core::error::CoreError;
use stellar_core::patch::{self, Patch};
use stellar_core::types::DbId;

/// A planet row from the `planets` table. No column is required.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Planet {
    pub id: DbId,
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

/// DTO for creating a new planet. Omitted fields are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlanet {
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

impl Planet {
    /// Apply a partial update by field name.
    ///
    /// Unknown names are rejected before anything is assigned.
    pub fn apply_patch(&mut self, input: &Patch) -> Result<(), CoreError> {
        patch::ensure_known_fields(EntityKind::Planet, input)?;
        for (key, value) in input {
            match key.as_str() {
                "name" => self.name = patch::text(key, value)?,
                "distance_from_earth" => self.distance_from_earth = patch::integer(key, value)?,
                "nearest_star" => self.nearest_star = patch::text(key, value)?,
                _ => {
                    return Err(CoreError::UnknownField {
                        entity: EntityKind::Planet.name(),
                        field: key.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}
