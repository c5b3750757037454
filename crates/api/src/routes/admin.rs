//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require an administrator (enforced by handler extractors).
///
/// ```text
/// PUT    /users/{id}/admin  -> toggle_admin
/// DELETE /users/{id}        -> delete_user
/// GET    /stats             -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/admin", put(admin::toggle_admin))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/stats", get(admin::get_stats))
}
