use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A user-authored AI persona: profile personality plus structured career
/// metadata used by the match scorer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonaRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub tone: String,
    pub response_style: String,
    /// Nullable JSONB column. Absence means no career factor can score.
    pub career: Option<Json<CareerProfile>>,
    /// Nullable JSONB column. Absence means no preference factor can score.
    pub job_preferences: Option<Json<JobPreferences>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonaRow {
    pub fn career(&self) -> Option<&CareerProfile> {
        self.career.as_ref().map(|j| &j.0)
    }

    pub fn job_preferences(&self) -> Option<&JobPreferences> {
        self.job_preferences.as_ref().map(|j| &j.0)
    }
}

/// Career metadata on a persona. Every field is optional — the scorer treats
/// a missing field as "skip that factor", never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerProfile {
    pub title: Option<String>,
    pub experience_years: Option<i32>,
    pub industry: Option<String>,
    pub specializations: Option<Vec<String>>,
}

/// Job-search preferences on a persona.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPreferences {
    pub remote: Option<bool>,
    pub location: Option<Vec<String>>,
    pub job_types: Option<Vec<String>>,
    pub salary_range: Option<SalaryRange>,
}

/// Preferred salary band, annual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
}
