//! Repository for the `modules` table.

use questlearn_core::catalog::ProgressAnnotation;
use questlearn_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::module::{CreateModule, Module, ModuleWithProgress};
use crate::repositories::progress_repo::{lock_all_users, recompute_all_progress};

const COLUMNS: &str = "id, world_id, title, content, sort_order, created_at, updated_at";

/// Module columns qualified with the `m` alias, for JOIN queries.
const M_COLUMNS: &str =
    "m.id, m.world_id, m.title, m.content, m.sort_order, m.created_at, m.updated_at";

/// A module row joined with the caller's (optional) ledger row.
#[derive(FromRow)]
struct ModuleProgressRow {
    #[sqlx(flatten)]
    module: Module,
    completed: Option<bool>,
    progress_score: Option<i32>,
}

/// Provides CRUD operations for modules.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a new module.
    ///
    /// Adding a module changes the catalog size, so every user's progress
    /// percentage is recomputed in the same transaction.
    pub async fn create(pool: &PgPool, input: &CreateModule) -> Result<Module, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_all_users(&mut tx).await?;

        let query = format!(
            "INSERT INTO modules (world_id, title, content, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let module = sqlx::query_as::<_, Module>(&query)
            .bind(input.world_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        recompute_all_progress(&mut tx).await?;
        tx.commit().await?;
        Ok(module)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the modules of a world in display order.
    pub async fn list_by_world(pool: &PgPool, world_id: DbId) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules
             WHERE world_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(world_id)
            .fetch_all(pool)
            .await
    }

    /// List the modules of a world, annotated with `user_id`'s ledger state.
    ///
    /// With no user every module carries `user_progress: None`. With a user,
    /// modules without a ledger row get the default annotation.
    pub async fn list_by_world_with_progress(
        pool: &PgPool,
        world_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<Vec<ModuleWithProgress>, sqlx::Error> {
        let Some(user_id) = user_id else {
            let modules = Self::list_by_world(pool, world_id).await?;
            return Ok(modules
                .into_iter()
                .map(|module| ModuleWithProgress {
                    module,
                    user_progress: None,
                })
                .collect());
        };

        let query = format!(
            "SELECT {M_COLUMNS}, up.completed, up.score AS progress_score
             FROM modules m
             LEFT JOIN user_progress up ON up.module_id = m.id AND up.user_id = $2
             WHERE m.world_id = $1
             ORDER BY m.sort_order, m.id"
        );
        let rows = sqlx::query_as::<_, ModuleProgressRow>(&query)
            .bind(world_id)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ModuleWithProgress {
                module: row.module,
                user_progress: Some(ProgressAnnotation {
                    completed: row.completed.unwrap_or(false),
                    score: row.progress_score.unwrap_or(0),
                }),
            })
            .collect())
    }

    /// Delete a module with its activities and ledger rows, then recompute
    /// every user's progress. Returns `true` if the module existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_all_users(&mut tx).await?;

        sqlx::query("DELETE FROM user_progress WHERE module_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM activities WHERE module_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        recompute_all_progress(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(module_id = id, "Module deleted");
        Ok(true)
    }

    /// Total number of modules in the catalog.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(pool)
            .await
    }
}
