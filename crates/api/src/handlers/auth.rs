//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use questlearn_core::catalog::require_field;
use questlearn_core::error::CoreError;
use questlearn_db::models::user::{CreateUser, User};
use questlearn_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response. The token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Verify credentials against the directory, create the user row on first
/// login and start a session.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let username = require_field("username", input.username.as_deref())?;
    // Passwords are not trimmed; only emptiness is checked here.
    let password = input
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CoreError::Validation("password is required".into()))?;

    let entry = state
        .directory
        .authenticate(&username, &password)
        .await?
        .ok_or_else(|| {
            tracing::info!(username = %username, "Login rejected");
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let user = UserRepo::find_or_create(
        &state.pool,
        &CreateUser {
            username: entry.username,
            email: entry.email,
            is_admin: false,
        },
    )
    .await?;

    let jwt = &state.config.jwt;
    let access_token = generate_token(user.id, &user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&access_token, jwt.expiry_secs(), state.config.cookie_secure);

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse {
            access_token,
            expires_in: jwt.expiry_secs(),
            user,
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Succeeds whether or not a session existed;
/// bearer tokens simply expire.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))]),
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    Ok(Json(UserResponse { user }))
}
