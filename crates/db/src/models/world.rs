//! World entity model and DTOs.

use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A top-level content container. Worlds are listed by `order`, then id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct World {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a world.
#[derive(Debug, Clone)]
pub struct CreateWorld {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub sort_order: i32,
}
