//! Axum route handlers for job browsing and match management.
//!
//! Two score read paths, kept deliberately distinct:
//! - browse computes scores live on every request,
//! - the saved listing returns the `match_score` frozen on the JobMatch row
//!   at save time. Stale snapshots are accepted by design.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{rank_jobs, PersonaSelection, ScoredJob, StatusFilter};
use crate::models::job::JobRow;
use crate::models::job_match::{is_valid_match_status, JobMatchRow};
use crate::models::persona::PersonaRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub user_id: Uuid,
    /// Persona id, or "all" / absent for the best score across personas.
    pub persona: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub jobs: Vec<ScoredJob>,
}

/// GET /api/v1/jobs/browse
///
/// Runs the filter/sort pipeline over all active jobs with live scores.
pub async fn handle_browse_jobs(
    State(state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> Result<Json<BrowseResponse>, AppError> {
    let selection = PersonaSelection::parse(params.persona.as_deref())?;
    let status_filter = StatusFilter::parse(params.status.as_deref())?;

    let jobs = sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE is_active ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    let personas = sqlx::query_as::<_, PersonaRow>("SELECT * FROM personas WHERE user_id = $1")
        .bind(params.user_id)
        .fetch_all(&state.db)
        .await?;

    let matches = sqlx::query_as::<_, JobMatchRow>("SELECT * FROM job_matches WHERE user_id = $1")
        .bind(params.user_id)
        .fetch_all(&state.db)
        .await?;

    let ranked = rank_jobs(
        jobs,
        &personas,
        &matches,
        &selection,
        params.q.as_deref().unwrap_or(""),
        status_filter,
    );

    Ok(Json(BrowseResponse { jobs: ranked }))
}

#[derive(Debug, Deserialize)]
pub struct SaveJobRequest {
    pub user_id: Uuid,
    pub persona_id: Uuid,
    /// Defaults to "saved".
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveJobResponse {
    pub job_match: JobMatchRow,
}

/// POST /api/v1/jobs/:id/save
///
/// Computes the live score for the chosen persona and freezes it into the
/// JobMatch row. Insert-or-update keyed on (user_id, job_id).
pub async fn handle_save_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<SaveJobRequest>,
) -> Result<Json<SaveJobResponse>, AppError> {
    let status = request.status.as_deref().unwrap_or("saved");
    if !is_valid_match_status(status) {
        return Err(AppError::Validation(format!(
            "invalid match status '{status}'"
        )));
    }

    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND is_active")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let persona =
        sqlx::query_as::<_, PersonaRow>("SELECT * FROM personas WHERE id = $1 AND user_id = $2")
            .bind(request.persona_id)
            .bind(request.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Persona {} not found", request.persona_id))
            })?;

    let score = state.match_scorer.score(&job, &persona).await?;

    let job_match = sqlx::query_as::<_, JobMatchRow>(
        r#"
        INSERT INTO job_matches (id, user_id, persona_id, job_id, match_score, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, job_id) DO UPDATE
            SET persona_id = EXCLUDED.persona_id,
                match_score = EXCLUDED.match_score,
                status = EXCLUDED.status,
                updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.persona_id)
    .bind(job_id)
    .bind(score as i32)
    .bind(status)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Saved job {job_id} for user {} with frozen score {score}",
        request.user_id
    );

    Ok(Json(SaveJobResponse { job_match }))
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SavedJobEntry {
    pub job_match: JobMatchRow,
    pub job: JobRow,
}

/// GET /api/v1/jobs/saved
///
/// Snapshot read path: reports the stored `match_score` as-is, even when the
/// persona or job has changed since the save.
pub async fn handle_saved_jobs(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SavedJobEntry>>, AppError> {
    let matches = sqlx::query_as::<_, JobMatchRow>(
        "SELECT * FROM job_matches WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    let job_ids: Vec<Uuid> = matches.iter().map(|m| m.job_id).collect();
    let jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ANY($1)")
        .bind(&job_ids)
        .fetch_all(&state.db)
        .await?;

    let entries = matches
        .into_iter()
        .filter_map(|job_match| {
            jobs.iter()
                .find(|j| j.id == job_match.job_id)
                .cloned()
                .map(|job| SavedJobEntry { job_match, job })
        })
        .collect();

    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMatchStatusRequest {
    pub user_id: Uuid,
    pub status: String,
}

/// PATCH /api/v1/matches/:id/status
///
/// Updates the workflow status only. The frozen score is never touched here —
/// no recomputation trigger exists anywhere in the system.
pub async fn handle_update_match_status(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(request): Json<UpdateMatchStatusRequest>,
) -> Result<Json<JobMatchRow>, AppError> {
    if !is_valid_match_status(&request.status) {
        return Err(AppError::Validation(format!(
            "invalid match status '{}'",
            request.status
        )));
    }

    let job_match = sqlx::query_as::<_, JobMatchRow>(
        r#"
        UPDATE job_matches
        SET status = $1, updated_at = now()
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(&request.status)
    .bind(match_id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;

    Ok(Json(job_match))
}
