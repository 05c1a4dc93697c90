//! Repository for the `planets` table.

use sqlx::{PgExecutor, PgPool};
use stellar_core::types::DbId;

use crate::models::planet::{CreatePlanet, Planet};
use crate::repositories::DeleteOutcome;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, distance_from_earth, nearest_star";

/// Provides CRUD operations for planets.
pub struct PlanetRepo;

impl PlanetRepo {
    /// Insert a new planet, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreatePlanet,
    ) -> Result<Planet, sqlx::Error> {
        let query = format!(
            "INSERT INTO planets (name, distance_from_earth, nearest_star)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planet>(&query)
            .bind(&input.name)
            .bind(input.distance_from_earth)
            .bind(&input.nearest_star)
            .fetch_one(executor)
            .await
    }

    /// Find a planet by its ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets WHERE id = $1");
        sqlx::query_as::<_, Planet>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a planet by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Planet>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch every planet whose ID is in `ids`, ordered by ID.
    pub async fn find_by_ids<'e, E: PgExecutor<'e>>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Planet>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List all planets ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets ORDER BY id");
        sqlx::query_as::<_, Planet>(&query).fetch_all(executor).await
    }

    /// Write every column of `planet` back to its row.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        planet: &Planet,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!(
            "UPDATE planets SET
                name = $2,
                distance_from_earth = $3,
                nearest_star = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planet>(&query)
            .bind(planet.id)
            .bind(&planet.name)
            .bind(planet.distance_from_earth)
            .bind(&planet.nearest_star)
            .fetch_optional(executor)
            .await
    }

    /// Delete a planet and every mission that targets it, in one transaction.
    ///
    /// Returns `None` if no planet with `id` exists; nothing is removed then.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DeleteOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let missions = sqlx::query("DELETE FROM missions WHERE planet_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        let outcome = DeleteOutcome {
            missions_removed: missions.rows_affected(),
        };
        tracing::debug!(planet_id = id, missions_removed = outcome.missions_removed, "Planet deleted");
        Ok(Some(outcome))
    }
}
