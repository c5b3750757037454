pub mod admin;
pub mod auth;
pub mod avatars;
pub mod health;
pub mod modules;
pub mod ranking;
pub mod worlds;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                       login (public)
/// /auth/logout                      logout (public)
/// /auth/me                          current user
///
/// /avatars                          list (public), create (admin)
/// /users/{id}/avatar                set avatar (self or admin)
///
/// /worlds                           list (public), create (admin)
/// /worlds/{id}                      delete (admin)
/// /worlds/{id}/modules              list with progress, create (admin)
/// /modules/{id}                     get with activity, delete (admin)
/// /modules/{id}/activities          create (admin)
/// /modules/{id}/complete            complete (user)
///
/// /ranking                          full leaderboard
/// /ranking/top/{limit}              top 1..=100
/// /user/position                    caller's position
///
/// /admin/users/{id}/admin           toggle admin
/// /admin/users/{id}                 delete user
/// /admin/stats                      platform statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/avatars", avatars::router())
        .nest("/users", avatars::user_router())
        .nest("/worlds", worlds::router())
        .nest("/modules", modules::router())
        .nest("/ranking", ranking::router())
        .route(
            "/user/position",
            get(handlers::ranking::get_user_position),
        )
        .nest("/admin", admin::router())
}
