//! Content catalog rules: worlds, modules, activities and avatars.
//!
//! Field validation for the admin create endpoints plus the per-module
//! progress annotation shown to learners.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `order` used when a world or module is created without one.
pub const DEFAULT_ORDER: i32 = 1;

/// Points awarded by an activity created without an explicit `score_value`.
pub const DEFAULT_SCORE_VALUE: i32 = 10;

pub const MAX_WORLD_NAME_LENGTH: usize = 100;
pub const MAX_MODULE_TITLE_LENGTH: usize = 100;
pub const MAX_AVATAR_NAME_LENGTH: usize = 50;
pub const MAX_IMAGE_URL_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Progress annotation
// ---------------------------------------------------------------------------

/// A learner's state for one module as shown in the world view.
///
/// The default (not completed, zero score) is what a learner sees for a
/// module they have never finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressAnnotation {
    pub completed: bool,
    pub score: i32,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Require a non-blank string field, returning it trimmed.
pub fn require_field(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

/// Validate a world name.
pub fn validate_world_name(name: Option<&str>) -> Result<String, CoreError> {
    let name = require_field("name", name)?;
    check_length("name", &name, MAX_WORLD_NAME_LENGTH)?;
    Ok(name)
}

/// Validate module title and content; both are mandatory.
pub fn validate_module_fields(
    title: Option<&str>,
    content: Option<&str>,
) -> Result<(String, String), CoreError> {
    let title = require_field("title", title)?;
    let content = require_field("content", content)?;
    check_length("title", &title, MAX_MODULE_TITLE_LENGTH)?;
    Ok((title, content))
}

/// Validated fields of a new activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFields {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answer: String,
    pub score_value: i32,
}

/// Validate a quiz activity: question and both answers are mandatory and the
/// score value may not be negative.
pub fn validate_activity(
    question: Option<&str>,
    correct_answer: Option<&str>,
    incorrect_answer: Option<&str>,
    score_value: Option<i32>,
) -> Result<ActivityFields, CoreError> {
    let question = require_field("question", question)?;
    let correct_answer = require_field("correct_answer", correct_answer)?;
    let incorrect_answer = require_field("incorrect_answer", incorrect_answer)?;
    let score_value = score_value.unwrap_or(DEFAULT_SCORE_VALUE);
    if score_value < 0 {
        return Err(CoreError::Validation(
            "score_value must not be negative".to_string(),
        ));
    }
    Ok(ActivityFields {
        question,
        correct_answer,
        incorrect_answer,
        score_value,
    })
}

/// Validate an avatar's name and image URL.
pub fn validate_avatar(
    name: Option<&str>,
    image_url: Option<&str>,
) -> Result<(String, String), CoreError> {
    let name = require_field("name", name)?;
    let image_url = require_field("image_url", image_url)?;
    check_length("name", &name, MAX_AVATAR_NAME_LENGTH)?;
    check_length("image_url", &image_url, MAX_IMAGE_URL_LENGTH)?;
    Ok((name, image_url))
}

/// Validate an optional image URL (worlds allow an empty one).
pub fn validate_optional_image_url(image_url: Option<&str>) -> Result<String, CoreError> {
    let url = image_url.map(str::trim).unwrap_or_default().to_string();
    check_length("image_url", &url, MAX_IMAGE_URL_LENGTH)?;
    Ok(url)
}
