//! Route definitions for the `/modules` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, progress};
use crate::state::AppState;

/// Routes mounted at `/modules`.
///
/// ```text
/// GET    /{id}             -> get_module
/// DELETE /{id}             -> delete_module (admin)
/// POST   /{id}/activities  -> create_activity (admin)
/// POST   /{id}/complete    -> complete_module (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(catalog::get_module).delete(catalog::delete_module),
        )
        .route("/{id}/activities", post(catalog::create_activity))
        .route("/{id}/complete", post(progress::complete_module))
}
