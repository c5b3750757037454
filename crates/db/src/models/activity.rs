use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single-question quiz attached to a module.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub module_id: DbId,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answer: String,
    /// Points suggested for a correct answer. Completion scores are supplied
    /// by the client and are not checked against this value.
    pub score_value: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub module_id: DbId,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answer: String,
    pub score_value: i32,
}
