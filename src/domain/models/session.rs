use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// An opaque admin session. Only the SHA-256 hash of the cookie value is
/// stored.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AdminSession {
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
