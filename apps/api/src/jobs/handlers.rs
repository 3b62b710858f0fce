//! Axum route handlers for job posting administration.
//!
//! Creation and mutation are admin-gated; reads of active jobs are public.
//! Deactivation is soft — saved JobMatch rows keep referencing the job.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::admin::handlers::require_admin;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    pub job_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub industry: Option<String>,
    pub experience_required: Option<i32>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    require_admin(&state.db, request.user_id).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if let (Some(min), Some(max)) = (request.salary_min, request.salary_max) {
        if min > max {
            return Err(AppError::Validation(
                "salary_min cannot exceed salary_max".to_string(),
            ));
        }
    }

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, title, company, description, requirements, skills, location, remote,
             job_type, salary_min, salary_max, industry, experience_required, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.title)
    .bind(&request.company)
    .bind(&request.description)
    .bind(&request.requirements)
    .bind(&request.skills)
    .bind(&request.location)
    .bind(request.remote)
    .bind(&request.job_type)
    .bind(request.salary_min)
    .bind(request.salary_max)
    .bind(&request.industry)
    .bind(request.experience_required)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Job {} created: {}", job.id, job.title);
    Ok(Json(job))
}

/// GET /api/v1/jobs
///
/// Plain active-job listing without scores; scored browsing lives under
/// `/api/v1/jobs/browse`.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE is_active ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub job_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub industry: Option<String>,
    pub experience_required: Option<i32>,
    pub is_active: Option<bool>,
}

/// PATCH /api/v1/jobs/:id
///
/// Partial update; absent fields keep their stored values. Changing a job
/// never recomputes frozen match scores.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    require_admin(&state.db, request.user_id).await?;

    let existing = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $1, company = $2, description = $3, requirements = $4, skills = $5,
            location = $6, remote = $7, job_type = $8, salary_min = $9, salary_max = $10,
            industry = $11, experience_required = $12, is_active = $13, updated_at = now()
        WHERE id = $14
        RETURNING *
        "#,
    )
    .bind(request.title.unwrap_or(existing.title))
    .bind(request.company.unwrap_or(existing.company))
    .bind(request.description.unwrap_or(existing.description))
    .bind(request.requirements.unwrap_or(existing.requirements))
    .bind(request.skills.unwrap_or(existing.skills))
    .bind(request.location.or(existing.location))
    .bind(request.remote.unwrap_or(existing.remote))
    .bind(request.job_type.or(existing.job_type))
    .bind(request.salary_min.or(existing.salary_min))
    .bind(request.salary_max.or(existing.salary_max))
    .bind(request.industry.or(existing.industry))
    .bind(request.experience_required.or(existing.experience_required))
    .bind(request.is_active.unwrap_or(existing.is_active))
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(job))
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub user_id: Uuid,
}

/// DELETE /api/v1/jobs/:id
///
/// Soft delete: flips `is_active` off so the job drops out of browse results
/// while saved matches keep their snapshot.
pub async fn handle_deactivate_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AdminQuery>,
) -> Result<Json<JobRow>, AppError> {
    require_admin(&state.db, params.user_id).await?;

    let job = sqlx::query_as::<_, JobRow>(
        "UPDATE jobs SET is_active = FALSE, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    tracing::info!("Job {id} deactivated");
    Ok(Json(job))
}
