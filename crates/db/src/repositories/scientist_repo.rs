//! Repository for the `scientists` table.

use sqlx::{PgExecutor, PgPool};
use stellar_core::types::DbId;

use crate::models::scientist::{NewScientist, Scientist};
use crate::repositories::DeleteOutcome;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, field_of_study";

/// Provides CRUD operations for scientists.
pub struct ScientistRepo;

impl ScientistRepo {
    /// Insert a validated scientist, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewScientist,
    ) -> Result<Scientist, sqlx::Error> {
        let query = format!(
            "INSERT INTO scientists (name, field_of_study)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scientist>(&query)
            .bind(&input.name)
            .bind(&input.field_of_study)
            .fetch_one(executor)
            .await
    }

    /// Find a scientist by its ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Scientist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scientists WHERE id = $1");
        sqlx::query_as::<_, Scientist>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a scientist by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Scientist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scientists WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Scientist>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch every scientist whose ID is in `ids`, ordered by ID.
    pub async fn find_by_ids<'e, E: PgExecutor<'e>>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<Scientist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scientists WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Scientist>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List all scientists ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Scientist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scientists ORDER BY id");
        sqlx::query_as::<_, Scientist>(&query)
            .fetch_all(executor)
            .await
    }

    /// Write every column of `scientist` back to its row.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        scientist: &Scientist,
    ) -> Result<Option<Scientist>, sqlx::Error> {
        let query = format!(
            "UPDATE scientists SET
                name = $2,
                field_of_study = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scientist>(&query)
            .bind(scientist.id)
            .bind(&scientist.name)
            .bind(&scientist.field_of_study)
            .fetch_optional(executor)
            .await
    }

    /// Delete a scientist and every mission they lead, in one transaction.
    ///
    /// Returns `None` if no scientist with `id` exists; nothing is removed then.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DeleteOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let missions = sqlx::query("DELETE FROM missions WHERE scientist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM scientists WHERE id = $1")
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
        tracing::debug!(
            scientist_id = id,
            missions_removed = outcome.missions_removed,
            "Scientist deleted"
        );
        Ok(Some(outcome))
    }
}
