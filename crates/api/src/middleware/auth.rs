//! Session-token extractors for Axum handlers.
//!
//! The token is read from `Authorization: Bearer <token>` first and from the
//! session cookie otherwise.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use questlearn_core::error::CoreError;
use questlearn_core::types::DbId;

use crate::auth::cookie::session_token;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the raw token out of the request, if any was sent.
fn extract_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header
            .to_str()
            .map_err(|_| unauthorized("Invalid Authorization header"))?;
        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;
        return Ok(Some(token));
    }
    Ok(session_token(&parts.headers))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?.ok_or_else(|| unauthorized("Authentication required"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

/// The caller if a valid token was sent, `None` otherwise.
///
/// Used by public endpoints that personalize their output. A bad or expired
/// token degrades to anonymous instead of failing the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
