//! Repository for the `user_progress` ledger and the scoring transaction.

use questlearn_core::scoring::{self, ScoreAccrual};
use questlearn_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::progress::{CompletionOutcome, ModuleCompletion, UserProgress};
use crate::models::user::User;
use crate::repositories::user_repo::COLUMNS as USER_COLUMNS;

/// Column list for `user_progress` queries.
const COLUMNS: &str =
    "id, user_id, module_id, completed, score, completed_at, created_at, updated_at";

/// Provides the module-completion write path and ledger counters.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Record that `user_id` completed `module_id` with `score`.
    ///
    /// Runs as one transaction:
    ///
    /// 1. Lock the user row (`FOR UPDATE`), serializing completions per user.
    /// 2. Check the module exists.
    /// 3. Upsert the ledger row: `completed = true`, `score` overwritten,
    ///    `completed_at = NOW()`.
    /// 4. Fold the award into `users.score` according to `accrual`.
    /// 5. Recompute `users.progress` from the ledger and the module count.
    ///
    /// A missing user or module rolls back and reports the not-found variant;
    /// any database error rolls back and propagates.
    pub async fn complete_module(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
        score: i32,
        accrual: ScoreAccrual,
    ) -> Result<CompletionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        let Some(user) = sqlx::query_as::<_, User>(&user_query)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(CompletionOutcome::UserNotFound);
        };

        let module_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM modules WHERE id = $1)")
                .bind(module_id)
                .fetch_one(&mut *tx)
                .await?;
        if !module_exists {
            return Ok(CompletionOutcome::ModuleNotFound);
        }

        let upsert = format!(
            "INSERT INTO user_progress (user_id, module_id, completed, score, completed_at)
             VALUES ($1, $2, true, $3, NOW())
             ON CONFLICT (user_id, module_id) DO UPDATE SET
                 completed = true,
                 score = EXCLUDED.score,
                 completed_at = EXCLUDED.completed_at
             RETURNING {COLUMNS}"
        );
        let progress = sqlx::query_as::<_, UserProgress>(&upsert)
            .bind(user_id)
            .bind(module_id)
            .bind(score)
            .fetch_one(&mut *tx)
            .await?;

        let (completed, ledger_sum): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(score), 0)::BIGINT
             FROM user_progress
             WHERE user_id = $1 AND completed",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(&mut *tx)
            .await?;

        let new_score = scoring::next_score(user.score, i64::from(score), ledger_sum, accrual);
        let new_progress = scoring::completion_percentage(completed, total);

        let update = format!(
            "UPDATE users SET score = $2, progress = $3
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&update)
            .bind(user_id)
            .bind(new_score)
            .bind(new_progress)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            module_id,
            score,
            total_score = user.score,
            progress = user.progress,
            accrual = accrual.as_str(),
            "Module completed",
        );

        Ok(CompletionOutcome::Completed(ModuleCompletion { progress, user }))
    }

    /// Number of users with at least one completed module.
    pub async fn count_active_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM user_progress WHERE completed")
            .fetch_one(pool)
            .await
    }
}

/// Lock every user row, in id order, for the rest of the transaction.
///
/// Catalog changes take this before touching modules so they acquire locks
/// in the same order as [`ProgressRepo::complete_module`] (user, then module).
pub(crate) async fn lock_all_users(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM users ORDER BY id FOR UPDATE")
        .execute(conn)
        .await?;
    Ok(())
}

/// Recompute `users.progress` for every user against the current catalog.
///
/// Returns the number of user rows updated.
pub(crate) async fn recompute_all_progress(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
        .fetch_one(&mut *conn)
        .await?;

    let counts: Vec<(DbId, i64)> = sqlx::query_as(
        "SELECT u.id, COUNT(up.id) FILTER (WHERE up.completed)
         FROM users u
         LEFT JOIN user_progress up ON up.user_id = u.id
         GROUP BY u.id",
    )
    .fetch_all(&mut *conn)
    .await?;

    if counts.is_empty() {
        return Ok(0);
    }

    let (ids, percentages): (Vec<DbId>, Vec<f64>) = counts
        .into_iter()
        .map(|(id, completed)| (id, scoring::completion_percentage(completed, total)))
        .unzip();

    let result = sqlx::query(
        "UPDATE users u SET progress = data.progress
         FROM UNNEST($1::BIGINT[], $2::DOUBLE PRECISION[]) AS data(id, progress)
         WHERE u.id = data.id",
    )
    .bind(&ids)
    .bind(&percentages)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}
