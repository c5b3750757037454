//! Route definitions for the `/ranking` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ranking;
use crate::state::AppState;

/// Routes mounted at `/ranking`.
///
/// ```text
/// GET /               -> get_ranking
/// GET /top/{limit}    -> get_top_ranking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ranking::get_ranking))
        .route("/top/{limit}", get(ranking::get_top_ranking))
}
