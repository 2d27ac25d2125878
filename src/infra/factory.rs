use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::notifications::NotificationService;
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo, postgres_invite_repo::PostgresInviteRepo,
    postgres_selection_repo::PostgresSelectionRepo, postgres_session_repo::PostgresSessionRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_invite_repo::SqliteInviteRepo,
    sqlite_selection_repo::SqliteSelectionRepo, sqlite_session_repo::SqliteSessionRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("invite.html", include_str!("../templates/invite.html"))
        .expect("Failed to load invite template");
    tera.add_raw_template("thanks.html", include_str!("../templates/thanks.html"))
        .expect("Failed to load thanks template");
    tera.add_raw_template("error.html", include_str!("../templates/error.html"))
        .expect("Failed to load error template");
    tera.add_raw_template("emails/invitation.html", include_str!("../templates/emails/invitation.html"))
        .expect("Failed to load invitation email template");
    tera.add_raw_template("emails/invitation.txt", include_str!("../templates/emails/invitation.txt"))
        .expect("Failed to load invitation email template");
    tera.add_raw_template("emails/planner_summary.html", include_str!("../templates/emails/planner_summary.html"))
        .expect("Failed to load planner summary email template");
    tera.add_raw_template("emails/planner_summary.txt", include_str!("../templates/emails/planner_summary.txt"))
        .expect("Failed to load planner summary email template");
    tera.add_raw_template("emails/confirmation.html", include_str!("../templates/emails/confirmation.html"))
        .expect("Failed to load confirmation email template");
    tera.add_raw_template("emails/confirmation.txt", include_str!("../templates/emails/confirmation.txt"))
        .expect("Failed to load confirmation email template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());

    let notifications = Arc::new(NotificationService::new(
        email_service.clone(),
        templates.clone(),
        config.base_url.clone(),
        config.planner_email.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let session_repo = Arc::new(PostgresSessionRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(session_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            invite_repo: Arc::new(PostgresInviteRepo::new(pool.clone())),
            selection_repo: Arc::new(PostgresSelectionRepo::new(pool.clone())),
            session_repo,
            auth_service,
            email_service,
            notifications,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let session_repo = Arc::new(SqliteSessionRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(session_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            invite_repo: Arc::new(SqliteInviteRepo::new(pool.clone())),
            selection_repo: Arc::new(SqliteSelectionRepo::new(pool.clone())),
            session_repo,
            auth_service,
            email_service,
            notifications,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
