//! Axum route handlers for persona CRUD and AI-assisted authoring.
//!
//! Every query is scoped by `user_id`: a persona is owned by exactly one user
//! and is never visible to or mutable by anyone else.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::admin::settings::load_ai_settings;
use crate::errors::AppError;
use crate::models::persona::{CareerProfile, JobPreferences, PersonaRow};
use crate::personas::generate::{
    generate_persona, generate_resume, refine_persona, GeneratedPersona,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonaRequest {
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub tone: String,
    pub response_style: String,
    pub career: Option<CareerProfile>,
    pub job_preferences: Option<JobPreferences>,
}

/// POST /api/v1/personas
pub async fn handle_create_persona(
    State(state): State<AppState>,
    Json(request): Json<CreatePersonaRequest>,
) -> Result<Json<PersonaRow>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let persona = insert_persona(&state, &request).await?;
    Ok(Json(persona))
}

/// GET /api/v1/personas
pub async fn handle_list_personas(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PersonaRow>>, AppError> {
    let personas = sqlx::query_as::<_, PersonaRow>(
        "SELECT * FROM personas WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(personas))
}

/// GET /api/v1/personas/:id
pub async fn handle_get_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<PersonaRow>, AppError> {
    let persona = fetch_owned_persona(&state, id, params.user_id).await?;
    Ok(Json(persona))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonaRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub response_style: Option<String>,
    /// Double option: absent = leave unchanged, null = clear, value = replace.
    #[serde(default, deserialize_with = "double_option")]
    pub career: Option<Option<CareerProfile>>,
    #[serde(default, deserialize_with = "double_option")]
    pub job_preferences: Option<Option<JobPreferences>>,
}

/// Maps a present-but-null JSON field to `Some(None)` so PATCH can distinguish
/// "clear this field" from "leave it alone" (absent = `None` via default).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// PATCH /api/v1/personas/:id
pub async fn handle_update_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePersonaRequest>,
) -> Result<Json<PersonaRow>, AppError> {
    let existing = fetch_owned_persona(&state, id, request.user_id).await?;

    let career = match request.career {
        Some(new) => new.map(SqlJson),
        None => existing.career,
    };
    let job_preferences = match request.job_preferences {
        Some(new) => new.map(SqlJson),
        None => existing.job_preferences,
    };

    let persona = sqlx::query_as::<_, PersonaRow>(
        r#"
        UPDATE personas
        SET name = $1, description = $2, tone = $3, response_style = $4,
            career = $5, job_preferences = $6, updated_at = now()
        WHERE id = $7 AND user_id = $8
        RETURNING *
        "#,
    )
    .bind(request.name.unwrap_or(existing.name))
    .bind(request.description.unwrap_or(existing.description))
    .bind(request.tone.unwrap_or(existing.tone))
    .bind(request.response_style.unwrap_or(existing.response_style))
    .bind(career)
    .bind(job_preferences)
    .bind(id)
    .bind(request.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(persona))
}

/// DELETE /api/v1/personas/:id
pub async fn handle_delete_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM personas WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Persona {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GeneratePersonaRequest {
    pub user_id: Uuid,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePersonaResponse {
    pub persona: PersonaRow,
    pub draft: GeneratedPersona,
}

/// POST /api/v1/personas/generate
///
/// LLM structured-object generation of a persona from a free-text
/// description, persisted immediately for the requesting user.
pub async fn handle_generate_persona(
    State(state): State<AppState>,
    Json(request): Json<GeneratePersonaRequest>,
) -> Result<Json<GeneratePersonaResponse>, AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let settings = load_ai_settings(&state.db).await?;
    let draft = generate_persona(
        &state.llm,
        &settings.generation_params(),
        &request.description,
    )
    .await?;

    let persona = insert_persona(
        &state,
        &CreatePersonaRequest {
            user_id: request.user_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            tone: draft.tone.clone(),
            response_style: draft.response_style.clone(),
            career: draft.career.clone(),
            job_preferences: draft.job_preferences.clone(),
        },
    )
    .await?;

    Ok(Json(GeneratePersonaResponse { persona, draft }))
}

#[derive(Debug, Deserialize)]
pub struct RefinePersonaRequest {
    pub user_id: Uuid,
    pub instructions: String,
}

/// POST /api/v1/personas/:id/refine
///
/// LLM fine-tune of an existing persona; the refined draft replaces the
/// stored persona fields.
pub async fn handle_refine_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RefinePersonaRequest>,
) -> Result<Json<PersonaRow>, AppError> {
    if request.instructions.trim().is_empty() {
        return Err(AppError::Validation(
            "instructions cannot be empty".to_string(),
        ));
    }

    let existing = fetch_owned_persona(&state, id, request.user_id).await?;
    let settings = load_ai_settings(&state.db).await?;
    let draft = refine_persona(
        &state.llm,
        &settings.generation_params(),
        &existing,
        &request.instructions,
    )
    .await?;

    let persona = sqlx::query_as::<_, PersonaRow>(
        r#"
        UPDATE personas
        SET name = $1, description = $2, tone = $3, response_style = $4,
            career = $5, job_preferences = $6, updated_at = now()
        WHERE id = $7 AND user_id = $8
        RETURNING *
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(&draft.tone)
    .bind(&draft.response_style)
    .bind(draft.career.map(SqlJson))
    .bind(draft.job_preferences.map(SqlJson))
    .bind(id)
    .bind(request.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(persona))
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub persona_id: Uuid,
    pub resume: String,
}

/// POST /api/v1/personas/:id/resume
///
/// Generates a plain-text resume for the persona. Nothing is persisted.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let persona = fetch_owned_persona(&state, id, request.user_id).await?;
    let settings = load_ai_settings(&state.db).await?;
    let resume = generate_resume(&state.llm, &settings.generation_params(), &persona).await?;

    Ok(Json(ResumeResponse {
        persona_id: id,
        resume,
    }))
}

async fn fetch_owned_persona(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<PersonaRow, AppError> {
    sqlx::query_as::<_, PersonaRow>("SELECT * FROM personas WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Persona {id} not found")))
}

async fn insert_persona(
    state: &AppState,
    request: &CreatePersonaRequest,
) -> Result<PersonaRow, AppError> {
    let persona = sqlx::query_as::<_, PersonaRow>(
        r#"
        INSERT INTO personas
            (id, user_id, name, description, tone, response_style, career, job_preferences)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(&request.tone)
    .bind(&request.response_style)
    .bind(request.career.clone().map(SqlJson))
    .bind(request.job_preferences.clone().map(SqlJson))
    .fetch_one(&state.db)
    .await?;
    Ok(persona)
}
