use std::sync::Arc;
use crate::domain::models::{event::Event, invite::Invite, selection::Selection};
use crate::domain::ports::EmailService;
use crate::domain::services::themes;
use crate::error::AppError;
use tera::{Context, Tera};
use tracing::{info, warn};

/// Renders and sends the three notification types, each as an HTML +
/// plaintext pair. Selection notifications run after the commit and are
/// isolated from each other: a delivery failure is logged, never propagated.
pub struct NotificationService {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    base_url: String,
    planner_email: Option<String>,
}

impl NotificationService {
    pub fn new(
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
        base_url: String,
        planner_email: Option<String>,
    ) -> Self {
        Self { email_service, templates, base_url, planner_email }
    }

    /// Invitation email for a freshly issued or resent invite. The caller
    /// decides whether a send failure is fatal.
    pub async fn send_invitation(&self, event: &Event, invite: &Invite) -> Result<(), AppError> {
        let recipient = invite.email.as_deref()
            .ok_or_else(|| AppError::Validation("Invite has no recipient address".to_string()))?;

        let ctx = self.event_context(event, &invite.share_url(&self.base_url));
        let subject = format!("You're invited: {}", event.title);
        self.render_and_send(recipient, &subject, "invitation", &ctx).await?;

        info!("Invitation sent for event {}", event.id);
        Ok(())
    }

    /// Fires the planner summary and the recipient confirmation after a
    /// selection has been committed. Failures are warnings only; the
    /// business outcome already stands.
    pub async fn dispatch_selection(&self, event: &Event, invite: &Invite, selection: &Selection) {
        match &self.planner_email {
            Some(planner) => {
                let mut ctx = self.event_context(event, &invite.share_url(&self.base_url));
                ctx.insert("dinner", &selection.dinner);
                ctx.insert("activity", &selection.activity);
                ctx.insert("mood", &selection.mood);
                ctx.insert("notes", &selection.notes);

                let subject = format!("Date night locked in: {}", event.title);
                if let Err(e) = self.render_and_send(planner, &subject, "planner_summary", &ctx).await {
                    warn!("Planner notification failed (selection already recorded): {}", e);
                }
            }
            // No planner configured is a silent no-op.
            None => {}
        }

        if let Some(recipient) = invite.email.as_deref() {
            let ctx = self.event_context(event, &invite.share_url(&self.base_url));
            let subject = format!("See you soon: {}", event.title);
            if let Err(e) = self.render_and_send(recipient, &subject, "confirmation", &ctx).await {
                warn!("Recipient confirmation failed (selection already recorded): {}", e);
            }
        }
    }

    fn event_context(&self, event: &Event, invite_url: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("event_title", &event.title);
        ctx.insert("blurb", &event.blurb);
        ctx.insert("event_date", &event.event_date.map(|d| d.to_string()));
        ctx.insert("invite_url", invite_url);

        if let Some(theme) = themes::find(&event.theme) {
            ctx.insert("theme_name", theme.display_name);
            ctx.insert("theme_tagline", theme.tagline);
        } else {
            ctx.insert("theme_name", &event.theme);
            ctx.insert("theme_tagline", "");
        }
        ctx
    }

    async fn render_and_send(
        &self,
        recipient: &str,
        subject: &str,
        template_base: &str,
        ctx: &Context,
    ) -> Result<(), AppError> {
        let html_body = self.templates.render(&format!("emails/{}.html", template_base), ctx)
            .map_err(|e| AppError::InternalWithMsg(format!("Template render failed: {}", e)))?;
        let text_body = self.templates.render(&format!("emails/{}.txt", template_base), ctx)
            .map_err(|e| AppError::InternalWithMsg(format!("Template render failed: {}", e)))?;

        self.email_service.send(recipient, subject, &html_body, &text_body).await
    }
}
