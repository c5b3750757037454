//! Aggregate queries for the admin dashboard.

use questlearn_core::ranking::STATS_TOP_USERS;
use questlearn_core::scoring::round_two_places;
use sqlx::PgPool;

use crate::models::ranking::RankingRow;
use crate::models::stats::PlatformStats;
use crate::repositories::{ProgressRepo, RankingRepo};

pub struct StatsRepo;

impl StatsRepo {
    /// Collect catalog and engagement counters.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        let (total_users, total_worlds, total_modules, total_activities, average_progress): (
            i64,
            i64,
            i64,
            i64,
            f64,
        ) = sqlx::query_as(
            "SELECT
                 (SELECT COUNT(*) FROM users),
                 (SELECT COUNT(*) FROM worlds),
                 (SELECT COUNT(*) FROM modules),
                 (SELECT COUNT(*) FROM activities),
                 (SELECT COALESCE(AVG(progress), 0)::DOUBLE PRECISION FROM users)",
        )
        .fetch_one(pool)
        .await?;

        let active_users = ProgressRepo::count_active_users(pool).await?;

        Ok(PlatformStats {
            total_users,
            active_users,
            total_worlds,
            total_modules,
            total_activities,
            average_progress: round_two_places(average_progress),
        })
    }

    /// Leaders shown next to the stats.
    pub async fn top_users(pool: &PgPool) -> Result<Vec<RankingRow>, sqlx::Error> {
        RankingRepo::top(pool, STATS_TOP_USERS).await
    }
}
