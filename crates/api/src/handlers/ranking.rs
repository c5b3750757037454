//! Leaderboard handlers.

use axum::extract::State;
use axum::Json;
use questlearn_core::ranking::validate_top_limit;
use questlearn_core::types::DbId;
use questlearn_db::models::ranking::RankingRow;
use questlearn_db::repositories::{RankingRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// One leaderboard line.
#[derive(Debug, Serialize)]
pub struct RankingEntry {
    /// 1-based place in the leaderboard.
    pub position: i64,
    pub username: String,
    pub score: i64,
    pub time_spent: i64,
    pub progress: f64,
    pub is_current_user: bool,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub ranking: Vec<RankingEntry>,
    pub total_users: i64,
}

#[derive(Debug, Serialize)]
pub struct TopRankingResponse {
    pub ranking: Vec<RankingEntry>,
    pub limit: i64,
    pub total_users: i64,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub position: i64,
    pub total_users: i64,
    pub score: i64,
    pub time_spent: i64,
    pub progress: f64,
}

/// Number rows already in leaderboard order and flag the caller's row.
fn to_entries(rows: Vec<RankingRow>, caller: Option<DbId>) -> Vec<RankingEntry> {
    rows.into_iter()
        .zip(1..)
        .map(|(row, position)| RankingEntry {
            position,
            is_current_user: caller == Some(row.id),
            username: row.username,
            score: row.score,
            time_spent: row.time_spent,
            progress: row.progress,
        })
        .collect()
}

/// GET /api/v1/ranking
pub async fn get_ranking(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<RankingResponse>> {
    let rows = RankingRepo::list(&state.pool).await?;
    let total_users = rows.len() as i64;

    Ok(Json(RankingResponse {
        ranking: to_entries(rows, caller.user_id()),
        total_users,
    }))
}

/// GET /api/v1/ranking/top/{limit}
///
/// `limit` must be between 1 and 100.
pub async fn get_top_ranking(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(limit): AppPath<i64>,
) -> AppResult<Json<TopRankingResponse>> {
    let limit = validate_top_limit(limit)?;

    let rows = RankingRepo::top(&state.pool, limit).await?;
    let total_users = UserRepo::count(&state.pool).await?;

    Ok(Json(TopRankingResponse {
        ranking: to_entries(rows, caller.user_id()),
        limit,
        total_users,
    }))
}

/// GET /api/v1/user/position
///
/// The caller's place, computed by counting the users ranked ahead.
pub async fn get_user_position(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<PositionResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;

    // The row can vanish between the two reads; report it the same way.
    let position = RankingRepo::position(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    let total_users = UserRepo::count(&state.pool).await?;

    Ok(Json(PositionResponse {
        position,
        total_users,
        score: user.score,
        time_spent: user.time_spent,
        progress: user.progress,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: DbId, username: &str) -> RankingRow {
        RankingRow {
            id,
            username: username.to_string(),
            score: 0,
            time_spent: 0,
            progress: 0.0,
        }
    }

    #[test]
    fn entries_are_numbered_from_one() {
        let entries = to_entries(vec![row(5, "b"), row(2, "a")], None);
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[1].position, 2);
        assert!(entries.iter().all(|e| !e.is_current_user));
    }

    #[test]
    fn caller_row_is_flagged() {
        let entries = to_entries(vec![row(5, "b"), row(2, "a")], Some(2));
        assert!(!entries[0].is_current_user);
        assert!(entries[1].is_current_user);
    }
}
