use datenight_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_invite_repo::SqliteInviteRepo,
        sqlite_selection_repo::SqliteSelectionRepo,
        sqlite_session_repo::SqliteSessionRepo,
    },
    domain::services::auth_service::AuthService,
    domain::services::notifications::NotificationService,
    domain::ports::EmailService,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const ADMIN_PASSWORD: &str = "test-password";

#[derive(Clone, Debug)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub fail: bool,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::InternalWithMsg("mail relay down".to_string()));
        }
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            text_body: text_body.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub sent: Arc<Mutex<Vec<SentMail>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::new_with(Some("planner@example.com"), false).await
    }

    pub async fn new_with(planner_email: Option<&str>, failing_mail: bool) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let salt = SaltString::generate(&mut OsRng);
        let admin_password_hash = Argon2::default()
            .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            planner_email: planner_email.map(|s| s.to_string()),
            admin_password_hash,
            session_ttl_hours: 12,
        };

        let sent = Arc::new(Mutex::new(Vec::new()));
        let email_service = Arc::new(MockEmailService {
            sent: sent.clone(),
            fail: failing_mail,
        });

        let templates = Arc::new(load_templates());
        let notifications = Arc::new(NotificationService::new(
            email_service.clone(),
            templates.clone(),
            config.base_url.clone(),
            config.planner_email.clone(),
        ));

        let session_repo = Arc::new(SqliteSessionRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(session_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            invite_repo: Arc::new(SqliteInviteRepo::new(pool.clone())),
            selection_repo: Arc::new(SqliteSelectionRepo::new(pool.clone())),
            session_repo,
            auth_service,
            email_service,
            notifications,
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            sent,
        }
    }

    /// Logs in and returns the value to send back in a Cookie header.
    pub async fn login(&self) -> String {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"password": ADMIN_PASSWORD}).to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookie = response.headers()
            .get(header::SET_COOKIE)
            .expect("No session cookie returned")
            .to_str()
            .unwrap();

        // "admin_session=<value>; ..." -> "admin_session=<value>"
        cookie.split(';').next().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn create_event(app: &TestApp, cookie: &str, payload: Value) -> String {
    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/events")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    ).await.unwrap();

    assert!(response.status().is_success(), "create_event failed: {}", response.status());
    parse_body(response).await["id"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub async fn issue_invite(app: &TestApp, cookie: &str, event_id: &str, email: Option<&str>) -> (String, String) {
    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/events/{}/invites", event_id))
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"email": email}).to_string()))
            .unwrap()
    ).await.unwrap();

    assert!(response.status().is_success(), "issue_invite failed: {}", response.status());
    let body = parse_body(response).await;
    (
        body["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Minimal x-www-form-urlencoded encoding for the values the tests use.
#[allow(dead_code)]
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs.iter()
        .map(|(k, v)| format!("{}={}", k, v.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

#[allow(dead_code)]
pub async fn post_selection(
    app: &TestApp,
    token: &str,
    dinner: &str,
    activity: &str,
    mood: &str,
) -> axum::response::Response {
    let body = form_encode(&[
        ("dinnerChoice", dinner),
        ("activityChoice", activity),
        ("moodChoice", mood),
        ("notes", ""),
    ]);

    app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/invite/{}", token))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    ).await.unwrap()
}
