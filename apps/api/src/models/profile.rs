use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user profile. `id` is the authenticated user's id — identity itself is
/// issued by the external auth provider, this row only carries app metadata.
///
/// `role` is the authoritative authorization gate for admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
