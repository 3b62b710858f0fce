//! Axum route handlers for user profiles.
//!
//! Profiles are inert records: upsert-your-own and read-anyone. The `role`
//! column is the admin gate and is deliberately NOT settable through this
//! endpoint — promotions happen out of band.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileRow, ROLE_USER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub headline: Option<String>,
}

/// PUT /api/v1/profiles
///
/// Creates or updates the caller's own profile. New profiles start with the
/// plain user role.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }

    let profile = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (id, username, full_name, headline, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
            SET username = EXCLUDED.username,
                full_name = EXCLUDED.full_name,
                headline = EXCLUDED.headline
        RETURNING *
        "#,
    )
    .bind(request.user_id)
    .bind(&request.username)
    .bind(&request.full_name)
    .bind(&request.headline)
    .bind(ROLE_USER)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}
