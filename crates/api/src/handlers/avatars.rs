//! Handlers for avatars and avatar selection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use questlearn_core::catalog::validate_avatar;
use questlearn_core::error::CoreError;
use questlearn_core::types::DbId;
use questlearn_db::models::avatar::{Avatar, CreateAvatar};
use questlearn_db::repositories::{AvatarRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::auth::UserResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAvatarRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetAvatarRequest {
    pub avatar_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct AvatarsResponse {
    pub avatars: Vec<Avatar>,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: Avatar,
}

/// GET /api/v1/avatars
pub async fn list_avatars(State(state): State<AppState>) -> AppResult<Json<AvatarsResponse>> {
    let avatars = AvatarRepo::list(&state.pool).await?;
    Ok(Json(AvatarsResponse { avatars }))
}

/// POST /api/v1/avatars
pub async fn create_avatar(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAvatarRequest>,
) -> AppResult<(StatusCode, Json<AvatarResponse>)> {
    let (name, image_url) = validate_avatar(input.name.as_deref(), input.image_url.as_deref())?;

    let avatar = AvatarRepo::create(&state.pool, &CreateAvatar { name, image_url }).await?;

    tracing::info!(avatar_id = avatar.id, user_id = admin.id, "Avatar created");
    Ok((StatusCode::CREATED, Json(AvatarResponse { avatar })))
}

/// PUT /api/v1/users/{id}/avatar
///
/// Users may change their own avatar; admins may change anyone's.
pub async fn set_user_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppJson(input): AppJson<SetAvatarRequest>,
) -> AppResult<Json<UserResponse>> {
    if auth.user_id != user_id {
        let caller_is_admin = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .is_some_and(|u| u.is_admin);
        if !caller_is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "You can only change your own avatar".into(),
            )));
        }
    }

    let avatar_id = input
        .avatar_id
        .ok_or_else(|| CoreError::Validation("avatar_id is required".into()))?;

    if AvatarRepo::find_by_id(&state.pool, avatar_id).await?.is_none() {
        return Err(AppError::not_found("Avatar", avatar_id));
    }

    let user = UserRepo::set_avatar(&state.pool, user_id, avatar_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))?;

    tracing::info!(user_id, avatar_id, changed_by = auth.user_id, "Avatar updated");
    Ok(Json(UserResponse { user }))
}
