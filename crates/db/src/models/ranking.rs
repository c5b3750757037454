//! Leaderboard row projection.

use questlearn_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// The user columns the leaderboard needs, in ranking order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RankingRow {
    pub id: DbId,
    pub username: String,
    pub score: i64,
    pub time_spent: i64,
    pub progress: f64,
}
