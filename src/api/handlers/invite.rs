use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::{requests::IssueInviteRequest, responses::IssuedInviteResponse};
use crate::domain::models::invite::Invite;
use crate::error::{is_unique_violation, AppError};
use std::sync::Arc;
use tracing::{info, warn};

// Token collisions are vanishingly rare at 190 bits of entropy; if the
// unique index still trips, regenerate rather than overwrite.
const TOKEN_RETRIES: u32 = 3;

pub async fn issue_invite(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<IssueInviteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !event.menu().is_complete() {
        return Err(AppError::Validation("Event menu has an empty group; fill it before inviting".into()));
    }

    let mut created = None;
    for attempt in 0..TOKEN_RETRIES {
        let invite = Invite::new(event.id.clone(), payload.email.clone());
        match state.invite_repo.create(&invite).await {
            Ok(invite) => {
                created = Some(invite);
                break;
            }
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                warn!("Invite token collision on attempt {}, regenerating", attempt + 1);
            }
            Err(e) => return Err(e),
        }
    }
    let created = created.ok_or(AppError::InternalWithMsg("Could not issue a unique invite token".into()))?;

    info!("Issued invite {} for event {}", created.id, event.id);

    if created.email.is_some() {
        if let Err(e) = state.notifications.send_invitation(&event, &created).await {
            warn!("Invitation email failed (invite still issued): {}", e);
        }
    }

    let invite_url = created.share_url(&state.config.base_url);
    Ok(Json(IssuedInviteResponse { invite: created, invite_url }))
}

pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let invites = state.invite_repo.list_by_event(&event.id).await?;
    Ok(Json(invites))
}

/// Re-dispatches the original invitation email. Same token, no state
/// change.
pub async fn resend_invite(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(invite_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invite = state.invite_repo.find_by_id(&invite_id).await?
        .ok_or(AppError::NotFound("Invite not found".into()))?;

    if invite.email.is_none() {
        return Err(AppError::Validation("Invite has no recipient address".into()));
    }

    let event = state.event_repo.find_by_id(&invite.event_id).await?
        .ok_or(AppError::EventMissing)?;

    state.notifications.send_invitation(&event, &invite).await?;

    info!("Resent invite: {}", invite_id);
    Ok(Json(serde_json::json!({"status": "sent"})))
}
