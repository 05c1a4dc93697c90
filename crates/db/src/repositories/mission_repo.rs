//! Repository for the `missions` table.

use sqlx::PgExecutor;
use stellar_core::types::DbId;

use crate::models::mission::{Mission, NewMission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, planet_id, scientist_id";

/// Provides CRUD operations for missions.
pub struct MissionRepo;

impl MissionRepo {
    /// Insert a validated mission, returning the created row.
    ///
    /// Fails with a foreign-key violation if the planet or scientist does
    /// not exist.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewMission,
    ) -> Result<Mission, sqlx::Error> {
        let query = format!(
            "INSERT INTO missions (name, planet_id, scientist_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(&input.name)
            .bind(input.planet_id)
            .bind(input.scientist_id)
            .fetch_one(executor)
            .await
    }

    /// Find a mission by its ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a mission by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all missions ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions ORDER BY id");
        sqlx::query_as::<_, Mission>(&query).fetch_all(executor).await
    }

    /// All missions targeting any of the given planets, ordered by ID.
    pub async fn list_by_planets<'e, E: PgExecutor<'e>>(
        executor: E,
        planet_ids: &[DbId],
    ) -> Result<Vec<Mission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM missions WHERE planet_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Mission>(&query)
            .bind(planet_ids)
            .fetch_all(executor)
            .await
    }

    /// All missions led by any of the given scientists, ordered by ID.
    pub async fn list_by_scientists<'e, E: PgExecutor<'e>>(
        executor: E,
        scientist_ids: &[DbId],
    ) -> Result<Vec<Mission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM missions WHERE scientist_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Mission>(&query)
            .bind(scientist_ids)
            .fetch_all(executor)
            .await
    }

    /// Write every column of `mission` back to its row.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        mission: &Mission,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET
                name = $2,
                planet_id = $3,
                scientist_id = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(mission.id)
            .bind(&mission.name)
            .bind(mission.planet_id)
            .bind(mission.scientist_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a single mission. Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
