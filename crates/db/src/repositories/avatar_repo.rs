//! Repository for the `avatars` table.

use questlearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::avatar::{Avatar, CreateAvatar};

const COLUMNS: &str = "id, name, image_url, created_at, updated_at";

pub struct AvatarRepo;

impl AvatarRepo {
    pub async fn create(pool: &PgPool, input: &CreateAvatar) -> Result<Avatar, sqlx::Error> {
        let query = format!(
            "INSERT INTO avatars (name, image_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Avatar>(&query)
            .bind(&input.name)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Avatar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM avatars WHERE id = $1");
        sqlx::query_as::<_, Avatar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Avatar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM avatars ORDER BY id");
        sqlx::query_as::<_, Avatar>(&query).fetch_all(pool).await
    }
}
