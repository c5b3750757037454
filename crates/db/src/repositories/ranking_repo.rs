//! Leaderboard queries over the `users` table.
//!
//! The ORDER BY and the "strictly ahead" predicate below encode the same
//! order (see `questlearn_core::ranking`) and must stay in sync.

use questlearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::ranking::RankingRow;

const COLUMNS: &str = "id, username, score, time_spent, progress";

const RANK_ORDER: &str = "score DESC, time_spent ASC, id ASC";

pub struct RankingRepo;

impl RankingRepo {
    /// Every user in leaderboard order.
    pub async fn list(pool: &PgPool) -> Result<Vec<RankingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY {RANK_ORDER}");
        sqlx::query_as::<_, RankingRow>(&query).fetch_all(pool).await
    }

    /// The first `limit` users in leaderboard order.
    ///
    /// The caller validates `limit`; see `questlearn_core::ranking::validate_top_limit`.
    pub async fn top(pool: &PgPool, limit: i64) -> Result<Vec<RankingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY {RANK_ORDER} LIMIT $1");
        sqlx::query_as::<_, RankingRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// 1-based leaderboard position of a user, counted rather than
    /// materialized. Returns `None` if the user does not exist.
    pub async fn position(pool: &PgPool, user_id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT 1 + (
                 SELECT COUNT(*) FROM users o
                 WHERE o.score > u.score
                    OR (o.score = u.score AND o.time_spent < u.time_spent)
                    OR (o.score = u.score AND o.time_spent = u.time_spent AND o.id < u.id)
             )
             FROM users u
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
