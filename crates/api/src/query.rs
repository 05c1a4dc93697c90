//! Shared query parameter types for API handlers.

use serde::Deserialize;
use stellar_core::entity::EntityKind;
use stellar_core::error::CoreError;
use stellar_core::serialization::SerializeRule;

/// Call-site serialization rules (`?exclude=missions.planet,name`).
///
/// Accepted by every endpoint that renders records. Paths are resolved
/// against the schema of the entity being rendered and layered on top of
/// that entity's default rules.
#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    pub exclude: Option<String>,
}

impl RenderParams {
    pub fn rules(&self, kind: EntityKind) -> Result<Vec<SerializeRule>, CoreError> {
        match &self.exclude {
            Some(raw) => SerializeRule::parse_list(kind, raw),
            None => Ok(Vec::new()),
        }
    }
}
