//! Progress ledger model and completion results.

use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::User;

/// A row from the `user_progress` ledger, unique per (user, module).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub completed: bool,
    /// Score recorded by the most recent completion (not cumulative).
    pub score: i32,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The ledger row and user aggregates written by one completion.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleCompletion {
    pub progress: UserProgress,
    pub user: User,
}

/// Result of [`ProgressRepo::complete_module`](crate::repositories::ProgressRepo::complete_module).
///
/// The not-found variants are returned after the transaction was rolled back.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    Completed(ModuleCompletion),
    UserNotFound,
    ModuleNotFound,
}
