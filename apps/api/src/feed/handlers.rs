//! Axum route handlers for the community feed.
//!
//! New posts enter the `pending` moderation state and only appear publicly
//! after an administrator approves them (see the admin module).

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::post::{PostRow, POST_STATUS_APPROVED, POST_STATUS_PENDING};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: Uuid,
    /// Persona the post is authored as, if any.
    pub persona_id: Option<Uuid>,
    pub content: String,
}

/// POST /api/v1/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<PostRow>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    if let Some(persona_id) = request.persona_id {
        let owned: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM personas WHERE id = $1 AND user_id = $2")
                .bind(persona_id)
                .bind(request.user_id)
                .fetch_optional(&state.db)
                .await?;
        if owned.is_none() {
            return Err(AppError::NotFound(format!(
                "Persona {persona_id} not found"
            )));
        }
    }

    let post = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (id, user_id, persona_id, content, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.persona_id)
    .bind(&request.content)
    .bind(POST_STATUS_PENDING)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(post))
}

/// GET /api/v1/posts
///
/// Public feed: approved posts only, newest first.
pub async fn handle_list_feed(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    let posts = sqlx::query_as::<_, PostRow>(
        "SELECT * FROM posts WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(POST_STATUS_APPROVED)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(posts))
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/posts/mine
///
/// The author's own posts in every moderation state.
pub async fn handle_list_own_posts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    let posts = sqlx::query_as::<_, PostRow>(
        "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(posts))
}
