//! Handlers for the content catalog: worlds, modules and activities.
//!
//! Reads are public. `GET /worlds/{id}/modules` personalizes its output when
//! the caller is logged in. Writes require an administrator.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use questlearn_core::catalog::{
    validate_activity, validate_module_fields, validate_optional_image_url, validate_world_name,
    DEFAULT_ORDER,
};
use questlearn_core::types::DbId;
use questlearn_db::models::activity::{Activity, CreateActivity};
use questlearn_db::models::module::{CreateModule, Module, ModuleDetail, ModuleWithProgress};
use questlearn_db::models::world::{CreateWorld, World};
use questlearn_db::repositories::{ActivityRepo, ModuleRepo, WorldRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateWorldRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub incorrect_answer: Option<String>,
    pub score_value: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct WorldsResponse {
    pub worlds: Vec<World>,
}

#[derive(Debug, Serialize)]
pub struct WorldResponse {
    pub world: World,
}

#[derive(Debug, Serialize)]
pub struct WorldModulesResponse {
    pub world: World,
    pub modules: Vec<ModuleWithProgress>,
}

#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub module: Module,
}

#[derive(Debug, Serialize)]
pub struct ModuleDetailResponse {
    pub module: ModuleDetail,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub activity: Activity,
}

// ---------------------------------------------------------------------------
// Worlds
// ---------------------------------------------------------------------------

/// GET /api/v1/worlds
pub async fn list_worlds(State(state): State<AppState>) -> AppResult<Json<WorldsResponse>> {
    let worlds = WorldRepo::list(&state.pool).await?;
    Ok(Json(WorldsResponse { worlds }))
}

/// POST /api/v1/worlds
pub async fn create_world(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWorldRequest>,
) -> AppResult<(StatusCode, Json<WorldResponse>)> {
    let name = validate_world_name(input.name.as_deref())?;
    let image_url = validate_optional_image_url(input.image_url.as_deref())?;

    let world = WorldRepo::create(
        &state.pool,
        &CreateWorld {
            name,
            description: input.description.unwrap_or_default(),
            image_url,
            sort_order: input.order.unwrap_or(DEFAULT_ORDER),
        },
    )
    .await?;

    tracing::info!(world_id = world.id, user_id = admin.id, "World created");
    Ok((StatusCode::CREATED, Json(WorldResponse { world })))
}

/// DELETE /api/v1/worlds/{id}
///
/// Removes the world with its modules, activities and ledger rows.
pub async fn delete_world(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(world_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !WorldRepo::delete(&state.pool, world_id).await? {
        return Err(AppError::not_found("World", world_id));
    }

    tracing::info!(world_id, user_id = admin.id, "World deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

/// GET /api/v1/worlds/{id}/modules
///
/// Modules of a world in display order. Logged-in callers get a
/// `user_progress` annotation on every module.
pub async fn get_world_modules(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(world_id): AppPath<DbId>,
) -> AppResult<Json<WorldModulesResponse>> {
    let world = WorldRepo::find_by_id(&state.pool, world_id)
        .await?
        .ok_or_else(|| AppError::not_found("World", world_id))?;

    let modules =
        ModuleRepo::list_by_world_with_progress(&state.pool, world_id, caller.user_id()).await?;

    Ok(Json(WorldModulesResponse { world, modules }))
}

/// POST /api/v1/worlds/{id}/modules
pub async fn create_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(world_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateModuleRequest>,
) -> AppResult<(StatusCode, Json<ModuleResponse>)> {
    if WorldRepo::find_by_id(&state.pool, world_id).await?.is_none() {
        return Err(AppError::not_found("World", world_id));
    }

    let (title, content) =
        validate_module_fields(input.title.as_deref(), input.content.as_deref())?;

    let module = ModuleRepo::create(
        &state.pool,
        &CreateModule {
            world_id,
            title,
            content,
            sort_order: input.order.unwrap_or(DEFAULT_ORDER),
        },
    )
    .await?;

    tracing::info!(
        module_id = module.id,
        world_id,
        user_id = admin.id,
        "Module created"
    );
    Ok((StatusCode::CREATED, Json(ModuleResponse { module })))
}

/// GET /api/v1/modules/{id}
///
/// The module with its first activity, if one exists.
pub async fn get_module(
    State(state): State<AppState>,
    AppPath(module_id): AppPath<DbId>,
) -> AppResult<Json<ModuleDetailResponse>> {
    let module = ModuleRepo::find_by_id(&state.pool, module_id)
        .await?
        .ok_or_else(|| AppError::not_found("Module", module_id))?;
    let activity = ActivityRepo::first_for_module(&state.pool, module_id).await?;

    Ok(Json(ModuleDetailResponse {
        module: ModuleDetail { module, activity },
    }))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(module_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ModuleRepo::delete(&state.pool, module_id).await? {
        return Err(AppError::not_found("Module", module_id));
    }

    tracing::info!(module_id, user_id = admin.id, "Module deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// POST /api/v1/modules/{id}/activities
pub async fn create_activity(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(module_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<ActivityResponse>)> {
    if ModuleRepo::find_by_id(&state.pool, module_id).await?.is_none() {
        return Err(AppError::not_found("Module", module_id));
    }

    let fields = validate_activity(
        input.question.as_deref(),
        input.correct_answer.as_deref(),
        input.incorrect_answer.as_deref(),
        input.score_value,
    )?;

    let activity = ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            module_id,
            question: fields.question,
            correct_answer: fields.correct_answer,
            incorrect_answer: fields.incorrect_answer,
            score_value: fields.score_value,
        },
    )
    .await?;

    tracing::info!(
        activity_id = activity.id,
        module_id,
        user_id = admin.id,
        "Activity created"
    );
    Ok((StatusCode::CREATED, Json(ActivityResponse { activity })))
}
