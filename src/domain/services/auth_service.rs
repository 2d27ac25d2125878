use std::sync::Arc;
use crate::domain::{models::session::AdminSession, ports::SessionRepository};
use crate::error::AppError;
use crate::config::Config;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Admin authentication: one password (stored as an Argon2 hash in config),
/// opaque session tokens whose SHA-256 hashes live in the store.
pub struct AuthService {
    repo: Arc<dyn SessionRepository>,
    config: Config,
}

impl AuthService {
    pub fn new(repo: Arc<dyn SessionRepository>, config: Config) -> Self {
        Self { repo, config }
    }

    pub async fn login(&self, password: &str) -> Result<String, AppError> {
        let parsed = PasswordHash::new(&self.config.admin_password_hash)
            .map_err(|_| AppError::InternalWithMsg("Invalid ADMIN_PASSWORD_HASH".to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::Unauthorized)?;

        let raw_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        let now = Utc::now();
        let session = AdminSession {
            token_hash: self.hash_token(&raw_token),
            created_at: now,
            expires_at: now + Duration::hours(self.config.session_ttl_hours),
        };
        self.repo.create(&session).await?;

        Ok(raw_token)
    }

    pub async fn logout(&self, raw_token: &str) -> Result<(), AppError> {
        self.repo.delete(&self.hash_token(raw_token)).await
    }

    pub async fn authenticate(&self, raw_token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_token);

        let session = self.repo.find(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at < Utc::now() {
            self.repo.delete(&token_hash).await?;
            return Err(AppError::Unauthorized);
        }

        Ok(())
    }

    fn hash_token(&self, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }
}
