use std::sync::Arc;
use crate::domain::ports::{
    EmailService, EventRepository, InviteRepository, SelectionRepository, SessionRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::notifications::NotificationService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub invite_repo: Arc<dyn InviteRepository>,
    pub selection_repo: Arc<dyn SelectionRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub notifications: Arc<NotificationService>,
    pub templates: Arc<Tera>,
}
