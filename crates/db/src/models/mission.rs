//! Mission entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stellar_core::entity::EntityKind;
use stellar_core::error::CoreError;
use stellar_core::patch::{self, Patch};
use stellar_core::types::DbId;
use stellar_core::validation::{require, ValidationError};

/// A mission row from the `missions` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub name: String,
    pub planet_id: DbId,
    pub scientist_id: DbId,
}

/// DTO for creating a new mission, as received from the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMission {
    pub name: Option<String>,
    pub planet_id: Option<DbId>,
    pub scientist_id: Option<DbId>,
}

/// A validated mission ready to insert.
///
/// The referenced planet and scientist are checked by the database's
/// foreign keys on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub name: String,
    pub planet_id: DbId,
    pub scientist_id: DbId,
}

impl TryFrom<CreateMission> for NewMission {
    type Error = ValidationError;

    fn try_from(input: CreateMission) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require("name", input.name)?,
            planet_id: require("planet_id", input.planet_id)?,
            scientist_id: require("scientist_id", input.scientist_id)?,
        })
    }
}

impl Mission {
    pub fn set_name(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        self.name = require("name", value)?;
        Ok(())
    }

    pub fn set_planet_id(&mut self, value: Option<DbId>) -> Result<(), ValidationError> {
        self.planet_id = require("planet_id", value)?;
        Ok(())
    }

    pub fn set_scientist_id(&mut self, value: Option<DbId>) -> Result<(), ValidationError> {
        self.scientist_id = require("scientist_id", value)?;
        Ok(())
    }

    /// Apply a partial update by field name.
    pub fn apply_patch(&mut self, input: &Patch) -> Result<(), CoreError> {
        patch::ensure_known_fields(EntityKind::Mission, input)?;
        for (key, value) in input {
            match key.as_str() {
                "name" => self.set_name(patch::text(key, value)?)?,
                "planet_id" => self.set_planet_id(patch::id(key, value)?)?,
                "scientist_id" => self.set_scientist_id(patch::id(key, value)?)?,
                _ => {
                    return Err(CoreError::UnknownField {
                        entity: EntityKind::Mission.name(),
                        field: key.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn apollo() -> Mission {
        Mission {
            id: 1,
            name: "Apollo".into(),
            planet_id: 2,
            scientist_id: 3,
        }
    }

    fn create(name: Option<&str>, planet_id: Option<DbId>, scientist_id: Option<DbId>) -> CreateMission {
        CreateMission {
            name: name.map(String::from),
            planet_id,
            scientist_id,
        }
    }

    fn patch(value: serde_json::Value) -> Patch {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn construct_with_valid_references() {
        let new = NewMission::try_from(create(Some("Apollo"), Some(2), Some(3))).unwrap();
        assert_eq!(
            new,
            NewMission {
                name: "Apollo".into(),
                planet_id: 2,
                scientist_id: 3,
            }
        );
    }

    #[test]
    fn construct_with_null_planet_fails() {
        let err = NewMission::try_from(create(Some("Apollo"), None, Some(3))).unwrap_err();
        assert_eq!(err.field, "planet_id");
    }

    #[test]
    fn construct_with_zero_scientist_fails() {
        let err = NewMission::try_from(create(Some("Apollo"), Some(2), Some(0))).unwrap_err();
        assert_eq!(err.field, "scientist_id");
    }

    #[test]
    fn construct_reports_first_failing_field() {
        let err = NewMission::try_from(create(Some(""), None, None)).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn create_dto_accepts_null_references() {
        let input: CreateMission =
            serde_json::from_value(json!({"name": "Apollo", "planet_id": null, "scientist_id": 1}))
                .unwrap();
        assert_eq!(input.planet_id, None);
    }

    #[test]
    fn patch_reassigns_planet() {
        let mut m = apollo();
        m.apply_patch(&patch(json!({"planet_id": 9}))).unwrap();
        assert_eq!(m.planet_id, 9);
    }

    #[test]
    fn patch_with_null_scientist_fails_and_keeps_reference() {
        let mut m = apollo();
        assert_matches!(
            m.apply_patch(&patch(json!({"scientist_id": null}))),
            Err(CoreError::InvalidField(ValidationError { field: "scientist_id" }))
        );
        assert_eq!(m.scientist_id, 3);
    }

    #[test]
    fn patch_with_string_id_is_a_type_error() {
        let mut m = apollo();
        assert_matches!(
            m.apply_patch(&patch(json!({"planet_id": "2"}))),
            Err(CoreError::Validation(_))
        );
    }
}
