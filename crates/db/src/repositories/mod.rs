//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Single-statement methods accept any [`sqlx::PgExecutor`], so they run
//! equally against the pool or inside a request-scoped transaction.
//! Cascading deletes open their own transaction on the pool.

pub mod mission_repo;
pub mod planet_repo;
pub mod scientist_repo;

pub use mission_repo::MissionRepo;
pub use planet_repo::PlanetRepo;
pub use scientist_repo::ScientistRepo;

/// Result of deleting an owner row together with its missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Missions removed along with the owner.
    pub missions_removed: u64,
}
