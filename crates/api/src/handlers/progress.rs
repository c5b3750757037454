//! Handler for module completion, the only writer of user scores.

use axum::extract::State;
use axum::Json;
use questlearn_core::scoring;
use questlearn_core::types::DbId;
use questlearn_db::models::progress::{CompletionOutcome, ModuleCompletion};
use questlearn_db::repositories::ProgressRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /modules/{id}/complete`.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteModuleRequest {
    /// Points earned. Must not be negative; not checked against the
    /// activity's `score_value`.
    #[serde(default)]
    pub score: i32,
}

/// POST /api/v1/modules/{id}/complete
///
/// Mark the module completed for the caller and fold `score` into their
/// aggregates. A missing body counts as `score = 0`; a negative score is
/// a 400.
pub async fn complete_module(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(module_id): AppPath<DbId>,
    input: Option<AppJson<CompleteModuleRequest>>,
) -> AppResult<Json<ModuleCompletion>> {
    let input = input.map(|AppJson(body)| body).unwrap_or_default();
    let score = scoring::validate_award(input.score)?;

    let outcome = ProgressRepo::complete_module(
        &state.pool,
        auth.user_id,
        module_id,
        score,
        state.config.score_accrual,
    )
    .await?;

    match outcome {
        CompletionOutcome::Completed(completion) => Ok(Json(completion)),
        CompletionOutcome::UserNotFound => Err(AppError::not_found("User", auth.user_id)),
        CompletionOutcome::ModuleNotFound => Err(AppError::not_found("Module", module_id)),
    }
}
