//! Handlers for the `/admin` resource.
//!
//! All handlers require an administrator via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use questlearn_core::types::DbId;
use questlearn_db::models::ranking::RankingRow;
use questlearn_db::models::stats::PlatformStats;
use questlearn_db::repositories::{StatsRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::handlers::auth::UserResponse;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: PlatformStats,
    pub top_users: Vec<RankingRow>,
}

/// PUT /api/v1/admin/users/{id}/admin
///
/// Grant or revoke administrator rights. Admins cannot change their own.
pub async fn toggle_admin(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    if admin.id == user_id {
        return Err(AppError::BadRequest(
            "You cannot change your own admin status".into(),
        ));
    }

    let user = UserRepo::toggle_admin(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))?;

    tracing::info!(
        user_id,
        is_admin = user.is_admin,
        changed_by = admin.id,
        "Admin status changed"
    );
    Ok(Json(UserResponse { user }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Delete a user and their ledger rows. Admins cannot delete themselves.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if admin.id == user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }

    if !UserRepo::delete(&state.pool, user_id).await? {
        return Err(AppError::not_found("User", user_id));
    }

    tracing::info!(user_id, deleted_by = admin.id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/stats
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponse>> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    let top_users = StatsRepo::top_users(&state.pool).await?;
    Ok(Json(StatsResponse { stats, top_users }))
}
