//! Axum route handlers for administration: post moderation and global AI
//! settings.
//!
//! Authorization is the server-side `profiles.role = 'admin'` check. This is
//! the authoritative gate — client-side admin flags are never trusted.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::admin::settings::{load_ai_settings, store_ai_settings};
use crate::errors::AppError;
use crate::models::post::{PostRow, POST_STATUS_APPROVED, POST_STATUS_PENDING, POST_STATUS_REJECTED};
use crate::models::profile::ROLE_ADMIN;
use crate::models::settings::AiSettingsRow;
use crate::state::AppState;

/// Rejects the request unless the user's profile carries the admin role.
pub async fn require_admin(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match role.as_deref() {
        Some(r) if r == ROLE_ADMIN => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    pub user_id: Uuid,
    /// Defaults to the pending queue.
    pub status: Option<String>,
}

/// GET /api/v1/admin/posts
///
/// Moderation queue: lists posts by status, pending first by default.
pub async fn handle_moderation_queue(
    State(state): State<AppState>,
    Query(params): Query<ModerationQuery>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    require_admin(&state.db, params.user_id).await?;

    let status = params.status.as_deref().unwrap_or(POST_STATUS_PENDING);
    if ![POST_STATUS_PENDING, POST_STATUS_APPROVED, POST_STATUS_REJECTED].contains(&status) {
        return Err(AppError::Validation(format!(
            "invalid post status '{status}'"
        )));
    }

    let posts = sqlx::query_as::<_, PostRow>(
        "SELECT * FROM posts WHERE status = $1 ORDER BY created_at ASC",
    )
    .bind(status)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(posts))
}

#[derive(Debug, Deserialize)]
pub struct ModeratePostRequest {
    pub user_id: Uuid,
    /// "approved" or "rejected".
    pub status: String,
}

/// PATCH /api/v1/admin/posts/:id
pub async fn handle_moderate_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<ModeratePostRequest>,
) -> Result<Json<PostRow>, AppError> {
    require_admin(&state.db, request.user_id).await?;

    if ![POST_STATUS_APPROVED, POST_STATUS_REJECTED].contains(&request.status.as_str()) {
        return Err(AppError::Validation(format!(
            "moderation status must be approved or rejected, got '{}'",
            request.status
        )));
    }

    let post = sqlx::query_as::<_, PostRow>(
        "UPDATE posts SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(&request.status)
    .bind(post_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    tracing::info!("Post {post_id} moderated to {}", request.status);
    Ok(Json(post))
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/admin/ai-settings
pub async fn handle_get_ai_settings(
    State(state): State<AppState>,
    Query(params): Query<AdminQuery>,
) -> Result<Json<AiSettingsRow>, AppError> {
    require_admin(&state.db, params.user_id).await?;
    Ok(Json(load_ai_settings(&state.db).await?))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateAiSettingsRequest {
    pub user_id: Uuid,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
    pub system_prompt: String,
}

/// PUT /api/v1/admin/ai-settings
pub async fn handle_update_ai_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateAiSettingsRequest>,
) -> Result<Json<AiSettingsRow>, AppError> {
    require_admin(&state.db, request.user_id).await?;

    if request.model.trim().is_empty() {
        return Err(AppError::Validation("model cannot be empty".to_string()));
    }
    if !(0.0..=1.0).contains(&request.temperature) {
        return Err(AppError::Validation(
            "temperature must be between 0.0 and 1.0".to_string(),
        ));
    }
    if request.max_tokens <= 0 {
        return Err(AppError::Validation(
            "max_tokens must be positive".to_string(),
        ));
    }

    let settings = store_ai_settings(
        &state.db,
        &request.model,
        request.temperature,
        request.max_tokens,
        &request.system_prompt,
    )
    .await?;

    tracing::info!("AI settings updated: model={}", settings.model);
    Ok(Json(settings))
}
