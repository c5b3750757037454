//! Route definitions for the `/worlds` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/worlds`.
///
/// ```text
/// GET    /               -> list_worlds
/// POST   /               -> create_world (admin)
/// DELETE /{id}           -> delete_world (admin)
/// GET    /{id}/modules   -> get_world_modules
/// POST   /{id}/modules   -> create_module (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_worlds).post(catalog::create_world))
        .route("/{id}", delete(catalog::delete_world))
        .route(
            "/{id}/modules",
            get(catalog::get_world_modules).post(catalog::create_module),
        )
}
