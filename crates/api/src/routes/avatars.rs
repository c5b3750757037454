//! Route definitions for avatars and avatar selection.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::avatars;
use crate::state::AppState;

/// Routes mounted at `/avatars`.
///
/// ```text
/// GET  /  -> list_avatars
/// POST /  -> create_avatar (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(avatars::list_avatars).post(avatars::create_avatar),
    )
}

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /{id}/avatar  -> set_user_avatar
/// ```
pub fn user_router() -> Router<AppState> {
    Router::new().route("/{id}/avatar", put(avatars::set_user_avatar))
}
