use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The recipient's one-time choice triple. Immutable once created; the
/// schema enforces at most one per invite.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Selection {
    pub id: String,
    pub invite_id: String,
    pub dinner: String,
    pub activity: String,
    pub mood: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Selection {
    pub fn new(
        invite_id: String,
        dinner: String,
        activity: String,
        mood: String,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invite_id,
            dinner,
            activity,
            mood,
            notes,
            created_at: Utc::now(),
        }
    }
}
