use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub base_url: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub planner_email: Option<String>,
    pub admin_password_hash: String, // Argon2 PHC string
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            planner_email: env::var("PLANNER_EMAIL").ok(),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set (Argon2 hash)"),
            session_ttl_hours: env::var("SESSION_TTL_HOURS").unwrap_or_else(|_| "12".to_string()).parse().expect("SESSION_TTL_HOURS must be a number"),
        }
    }
}
