//! Entity schema registry.
//!
//! Describes the three persisted record types, their scalar columns and the
//! relations between them. The registry is the single source the
//! serialization rules and the partial-update decoders are checked against.

/// A persisted record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Planet,
    Scientist,
    Mission,
}

/// Scalar columns of the `planets` table, in declaration order.
pub const PLANET_FIELDS: &[&str] = &["id", "name", "distance_from_earth", "nearest_star"];

/// Scalar columns of the `scientists` table, in declaration order.
pub const SCIENTIST_FIELDS: &[&str] = &["id", "name", "field_of_study"];

/// Scalar columns of the `missions` table, in declaration order.
pub const MISSION_FIELDS: &[&str] = &["id", "name", "planet_id", "scientist_id"];

impl EntityKind {
    /// Human-readable entity name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Planet => "Planet",
            Self::Scientist => "Scientist",
            Self::Mission => "Mission",
        }
    }

    /// Scalar column names, including the primary key.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Planet => PLANET_FIELDS,
            Self::Scientist => SCIENTIST_FIELDS,
            Self::Mission => MISSION_FIELDS,
        }
    }

    /// Columns a caller may assign. The primary key is store-assigned.
    pub fn writable_fields(self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().copied().filter(|f| *f != "id")
    }

    /// Relations declared on this entity, in rendering order.
    pub fn relations(self) -> &'static [Relation] {
        match self {
            Self::Planet => &[Relation::PlanetMissions],
            Self::Scientist => &[Relation::ScientistMissions],
            Self::Mission => &[Relation::MissionPlanet, Relation::MissionScientist],
        }
    }

    /// Look up a scalar column by name.
    pub fn field(self, name: &str) -> Option<&'static str> {
        self.fields().iter().copied().find(|f| *f == name)
    }

    /// Look up a relation declared on this entity by its attribute name.
    pub fn relation(self, name: &str) -> Option<Relation> {
        self.relations().iter().copied().find(|r| r.name() == name)
    }
}

/// Whether a relation yields a collection or a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// An edge of the entity graph.
///
/// Planet and Scientist own collections of missions; a Mission holds
/// back-references to both owners. The graph is therefore cyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// `Planet.missions`, joined on `missions.planet_id`.
    PlanetMissions,
    /// `Scientist.missions`, joined on `missions.scientist_id`.
    ScientistMissions,
    /// `Mission.planet`, following `missions.planet_id`.
    MissionPlanet,
    /// `Mission.scientist`, following `missions.scientist_id`.
    MissionScientist,
}

impl Relation {
    /// Attribute name under which the relation is rendered.
    pub fn name(self) -> &'static str {
        match self {
            Self::PlanetMissions | Self::ScientistMissions => "missions",
            Self::MissionPlanet => "planet",
            Self::MissionScientist => "scientist",
        }
    }

    pub fn source(self) -> EntityKind {
        match self {
            Self::PlanetMissions => EntityKind::Planet,
            Self::ScientistMissions => EntityKind::Scientist,
            Self::MissionPlanet | Self::MissionScientist => EntityKind::Mission,
        }
    }

    pub fn target(self) -> EntityKind {
        match self {
            Self::PlanetMissions | Self::ScientistMissions => EntityKind::Mission,
            Self::MissionPlanet => EntityKind::Planet,
            Self::MissionScientist => EntityKind::Scientist,
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            Self::PlanetMissions | Self::ScientistMissions => Cardinality::Many,
            Self::MissionPlanet | Self::MissionScientist => Cardinality::One,
        }
    }

    /// The relation on the target that leads back to the source.
    pub fn inverse(self) -> Relation {
        match self {
            Self::PlanetMissions => Self::MissionPlanet,
            Self::ScientistMissions => Self::MissionScientist,
            Self::MissionPlanet => Self::PlanetMissions,
            Self::MissionScientist => Self::ScientistMissions,
        }
    }
}
