//! Leaderboard ordering rules.
//!
//! Users are ranked by score (descending), then by time spent (ascending),
//! then by id (ascending). The id tie-break makes the order total, so the
//! position derived from counting users ahead always matches the index in
//! the materialized list. `RankingRepo` applies this order in SQL.

use crate::error::CoreError;

/// Smallest accepted `limit` for the top-N leaderboard.
pub const MIN_TOP_LIMIT: i64 = 1;

/// Largest accepted `limit` for the top-N leaderboard.
pub const MAX_TOP_LIMIT: i64 = 100;

/// Number of users shown in the admin statistics leaderboard.
pub const STATS_TOP_USERS: i64 = 5;

/// Validate the `limit` of a top-N request.
pub fn validate_top_limit(limit: i64) -> Result<i64, CoreError> {
    if !(MIN_TOP_LIMIT..=MAX_TOP_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "Limit must be between {MIN_TOP_LIMIT} and {MAX_TOP_LIMIT}"
        )));
    }
    Ok(limit)
}
