use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Valid JobMatch statuses. Stored as text; validated at the handler boundary.
pub const MATCH_STATUSES: [&str; 4] = ["interested", "applied", "rejected", "saved"];

/// A persisted link between a user's persona and a job.
///
/// `match_score` is a snapshot frozen at save time. It is never recomputed
/// when the persona or job later changes — the browse view always computes
/// live, the saved view always reads this stored value. The two can diverge.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub persona_id: Uuid,
    pub job_id: Uuid,
    pub match_score: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn is_valid_match_status(status: &str) -> bool {
    MATCH_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_are_valid() {
        for status in MATCH_STATUSES {
            assert!(is_valid_match_status(status));
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(!is_valid_match_status("bookmarked"));
        assert!(!is_valid_match_status(""));
        assert!(!is_valid_match_status("Saved"));
    }
}
