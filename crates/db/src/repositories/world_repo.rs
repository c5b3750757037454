//! Repository for the `worlds` table.

use questlearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::world::{CreateWorld, World};
use crate::repositories::progress_repo::{lock_all_users, recompute_all_progress};

const COLUMNS: &str = "id, name, description, image_url, sort_order, created_at, updated_at";

/// Provides CRUD operations for worlds.
pub struct WorldRepo;

impl WorldRepo {
    /// Insert a new world, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorld) -> Result<World, sqlx::Error> {
        let query = format!(
            "INSERT INTO worlds (name, description, image_url, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<World>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worlds WHERE id = $1");
        sqlx::query_as::<_, World>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all worlds in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<World>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worlds ORDER BY sort_order, id");
        sqlx::query_as::<_, World>(&query).fetch_all(pool).await
    }

    /// Delete a world and everything beneath it.
    ///
    /// In one transaction: ledger rows of the world's modules, their
    /// activities, the modules, then the world. Every user's progress is
    /// recomputed against the smaller catalog before commit. Returns `true`
    /// if the world existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_all_users(&mut tx).await?;

        sqlx::query(
            "DELETE FROM user_progress
             WHERE module_id IN (SELECT id FROM modules WHERE world_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM activities
             WHERE module_id IN (SELECT id FROM modules WHERE world_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let modules = sqlx::query("DELETE FROM modules WHERE world_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM worlds WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        recompute_all_progress(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            world_id = id,
            modules_deleted = modules.rows_affected(),
            "World deleted"
        );
        Ok(true)
    }
}
