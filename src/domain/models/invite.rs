use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const TOKEN_LEN: usize = 32;

/// A single-use access token scoped to one event. Pending while `used_at`
/// is absent; transitions to used exactly once, never back.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Invite {
    pub id: String,
    pub event_id: String,
    pub token: String,
    pub email: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    pub fn new(event_id: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            token: generate_token(),
            email,
            used_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    pub fn share_url(&self, base_url: &str) -> String {
        format!("{}/invite/{}", base_url.trim_end_matches('/'), self.token)
    }
}

// thread_rng is a CSPRNG; 32 alphanumeric chars is ~190 bits of entropy,
// which makes enumeration infeasible. Collisions are caught by the unique
// index and regenerated, never overwritten.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
