use crate::domain::models::{
    event::Event, invite::Invite, selection::Selection, session::AdminSession,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Removes the event together with its invites and their selections.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn create(&self, invite: &Invite) -> Result<Invite, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Invite>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Invite>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Invite>, AppError>;
}

#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Inserts the selection and flips the invite to used within one
    /// transaction. A lost race surfaces as `AlreadyUsed`, never as a raw
    /// constraint error.
    async fn record(&self, selection: &Selection) -> Result<Selection, AppError>;
    async fn find_by_invite(&self, invite_id: &str) -> Result<Option<Selection>, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &AdminSession) -> Result<(), AppError>;
    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError>;
    async fn delete(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, text_body: &str) -> Result<(), AppError>;
}
