use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A two-party chat conversation. Participant columns are stored in
/// normalized order (smaller uuid first) so each pair maps to one row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationRow {
    pub id: Uuid,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ConversationRow {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant, from `user_id`'s point of view.
    pub fn peer_of(&self, user_id: Uuid) -> Uuid {
        if self.user_a == user_id {
            self.user_b
        } else {
            self.user_a
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    /// True once the recipient has listed the conversation's messages.
    pub read: bool,
    /// True for messages produced by the persona auto-reply endpoint.
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_of_returns_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conv = ConversationRow {
            id: Uuid::new_v4(),
            user_a: a,
            user_b: b,
            created_at: Utc::now(),
        };
        assert_eq!(conv.peer_of(a), b);
        assert_eq!(conv.peer_of(b), a);
        assert!(conv.involves(a));
        assert!(!conv.involves(Uuid::new_v4()));
    }
}
