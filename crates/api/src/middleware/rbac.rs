//! Administrator check.
//!
//! Admin rights live in `users.is_admin` and can be revoked at any time, so
//! the flag is re-read on every request instead of being trusted from the
//! token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use questlearn_core::error::CoreError;
use questlearn_db::models::user::User;
use questlearn_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an administrator. Rejects with 401 when unauthenticated and 403
/// when the caller is not an admin.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;
        let user = UserRepo::find_by_id(&state.pool, caller.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;

        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin privileges required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
