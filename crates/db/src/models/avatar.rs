use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A selectable profile avatar.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Avatar {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAvatar {
    pub name: String,
    pub image_url: String,
}
