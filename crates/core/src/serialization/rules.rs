//! Exclusion rules for nested rendering.
//!
//! A rule names a path from the entity it is anchored on (`origin`) down to
//! either a relation or a scalar field, and removes that path from the
//! rendered output. Each entity type declares default rules that stop a
//! nested record from re-expanding the relation that leads back to its
//! parent; callers may layer extra rules on top for a single render.

use std::fmt;

use crate::entity::{EntityKind, Relation};
use crate::error::CoreError;

/// One exclusion, anchored on `origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeRule {
    pub origin: EntityKind,
    /// Relations walked from `origin`. When `field` is `None` the last
    /// relation is the one excluded.
    pub path: Vec<Relation>,
    /// Scalar field excluded at the end of `path`.
    pub field: Option<&'static str>,
}

impl SerializeRule {
    /// Exclude the relation at the end of `path`.
    pub fn relation(origin: EntityKind, path: &[Relation]) -> Self {
        Self {
            origin,
            path: path.to_vec(),
            field: None,
        }
    }

    /// Exclude a scalar field reached through `path`.
    pub fn field(origin: EntityKind, path: &[Relation], field: &'static str) -> Self {
        Self {
            origin,
            path: path.to_vec(),
            field: Some(field),
        }
    }

    /// Default rules declared for an entity type.
    ///
    /// - Planet: `missions.planet`
    /// - Scientist: `missions.scientist`
    /// - Mission: `planet.missions`, `scientist.missions`
    pub fn defaults(kind: EntityKind) -> Vec<SerializeRule> {
        use Relation::*;
        match kind {
            EntityKind::Planet => vec![Self::relation(kind, &[PlanetMissions, MissionPlanet])],
            EntityKind::Scientist => {
                vec![Self::relation(kind, &[ScientistMissions, MissionScientist])]
            }
            EntityKind::Mission => vec![
                Self::relation(kind, &[MissionPlanet, PlanetMissions]),
                Self::relation(kind, &[MissionScientist, ScientistMissions]),
            ],
        }
    }

    /// Parse a dotted rule such as `missions.planet` or
    /// `-missions.planet.nearest_star` against the schema of `origin`.
    ///
    /// A leading `-` is accepted and ignored; every rule excludes.
    pub fn parse(origin: EntityKind, raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(CoreError::Validation(
                "Serialization rule must not be empty".to_string(),
            ));
        }

        let segments: Vec<&str> = body.split('.').collect();
        let (last, walk) = segments
            .split_last()
            .ok_or_else(|| CoreError::Validation("Serialization rule must not be empty".into()))?;

        let mut kind = origin;
        let mut path = Vec::with_capacity(segments.len());
        for segment in walk {
            let rel = kind.relation(segment).ok_or_else(|| unknown_segment(raw, kind, segment))?;
            path.push(rel);
            kind = rel.target();
        }

        if let Some(rel) = kind.relation(last) {
            path.push(rel);
            Ok(Self::relation(origin, &path))
        } else if let Some(field) = kind.field(last) {
            Ok(Self::field(origin, &path, field))
        } else {
            Err(unknown_segment(raw, kind, last))
        }
    }

    /// Parse a comma-separated list of rules. Blank entries are skipped.
    pub fn parse_list(origin: EntityKind, raw: &str) -> Result<Vec<Self>, CoreError> {
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| Self::parse(origin, s))
            .collect()
    }
}

impl fmt::Display for SerializeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = self.path.iter().map(|r| r.name()).collect();
        if let Some(field) = self.field {
            parts.push(field);
        }
        write!(f, "-{}", parts.join("."))
    }
}

fn unknown_segment(raw: &str, kind: EntityKind, segment: &str) -> CoreError {
    CoreError::Validation(format!(
        "Invalid serialization rule '{}': {} has no field or relation '{segment}'",
        raw.trim(),
        kind.name()
    ))
}
