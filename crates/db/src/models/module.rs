//! Module entity model, DTOs and learner-facing views.

use questlearn_core::catalog::ProgressAnnotation;
use questlearn_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::activity::Activity;

/// A lesson inside a world. Modules are listed by `order`, then id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub world_id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a module.
#[derive(Debug, Clone)]
pub struct CreateModule {
    pub world_id: DbId,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
}

/// A module annotated with the caller's ledger state.
///
/// `user_progress` is omitted entirely for anonymous callers.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleWithProgress {
    #[serde(flatten)]
    pub module: Module,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_progress: Option<ProgressAnnotation>,
}

/// A module together with its quiz activity, if one was authored.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub module: Module,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
}
