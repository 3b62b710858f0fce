use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Moderation workflow states for community posts.
pub const POST_STATUS_PENDING: &str = "pending";
pub const POST_STATUS_APPROVED: &str = "approved";
pub const POST_STATUS_REJECTED: &str = "rejected";

/// A community feed post. New posts enter `pending` and only become publicly
/// visible once an administrator approves them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Optional persona the post was authored as.
    pub persona_id: Option<Uuid>,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
