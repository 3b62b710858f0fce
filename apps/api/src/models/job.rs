use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. Owned and mutated by administrators; immutable from the
/// scorer's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub job_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub industry: Option<String>,
    pub experience_required: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Bare job fixture used across scorer and pipeline tests.
    pub fn job_fixture() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build things".to_string(),
            requirements: vec![],
            skills: vec![],
            location: None,
            remote: false,
            job_type: None,
            salary_min: None,
            salary_max: None,
            industry: None,
            experience_required: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
