//! Repository for the `activities` table.

use questlearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity};

const COLUMNS: &str = "id, module_id, question, correct_answer, incorrect_answer, \
                       score_value, created_at, updated_at";

pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (module_id, question, correct_answer, incorrect_answer, score_value)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.module_id)
            .bind(&input.question)
            .bind(&input.correct_answer)
            .bind(&input.incorrect_answer)
            .bind(input.score_value)
            .fetch_one(pool)
            .await
    }

    /// The module's quiz: its oldest activity, if any.
    pub async fn first_for_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE module_id = $1
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(module_id)
            .fetch_optional(pool)
            .await
    }
}
