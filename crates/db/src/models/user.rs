//! User entity model and DTOs.

use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Credentials are held by the external directory, so the row is safe to
/// serialize as-is.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub avatar_id: Option<DbId>,
    /// Cumulative awarded score. Written only by the completion transaction.
    pub score: i64,
    /// Completion percentage (0-100), derived from the progress ledger.
    pub progress: f64,
    /// Seconds spent on the platform; ranking tie-breaker.
    pub time_spent: i64,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}
