use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::{
    requests::{CreateEventRequest, UpdateMenuRequest},
    responses::{InviteWithSelection, ThemeResponse},
};
use crate::domain::models::event::{Event, Menu};
use crate::domain::services::themes;
use crate::error::AppError;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::info;

pub async fn list_themes(_user: AdminUser) -> impl IntoResponse {
    let catalog: Vec<ThemeResponse> = themes::THEMES.iter()
        .map(|t| ThemeResponse {
            id: t.id,
            display_name: t.display_name,
            tagline: t.tagline,
            default_menu: t.default_menu(),
        })
        .collect();
    Json(catalog)
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event: {}", payload.title);

    let theme = themes::find(&payload.theme)
        .ok_or_else(|| AppError::Validation(format!("Unknown theme '{}'", payload.theme)))?;

    let menu = payload.menu.unwrap_or_else(|| theme.default_menu());
    if !menu.is_complete() {
        return Err(AppError::Validation("Each menu group needs at least one option".into()));
    }

    let menu_json = menu.encode()
        .map_err(|_| AppError::Validation("Invalid menu".into()))?;

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: payload.title,
        theme: payload.theme,
        event_date: payload.event_date,
        menu_json,
        blurb: payload.blurb,
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event).await?;
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let invites = state.invite_repo.list_by_event(&event.id).await?;
    let mut detailed = Vec::with_capacity(invites.len());
    for invite in invites {
        let selection = state.selection_repo.find_by_invite(&invite.id).await?;
        detailed.push(InviteWithSelection { invite, selection });
    }

    let mut body = serde_json::to_value(&event).map_err(|_| AppError::Internal)?;
    body["menu"] = serde_json::to_value(event.menu()).map_err(|_| AppError::Internal)?;
    body["invites"] = serde_json::to_value(detailed).map_err(|_| AppError::Internal)?;

    Ok(Json(body))
}

/// Replaces the event's three option groups and blurb. The menu is a live
/// reference: pending invites will be validated against the new contents.
pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateMenuRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let menu = Menu {
        dinner: payload.dinner,
        activity: payload.activity,
        mood: payload.mood,
    };
    if !menu.is_complete() {
        return Err(AppError::Validation("Each menu group needs at least one option".into()));
    }

    event.menu_json = menu.encode()
        .map_err(|_| AppError::Validation("Invalid menu".into()))?;
    // Full replacement: omitting the blurb clears it.
    event.blurb = payload.blurb;

    let updated = state.event_repo.update(&event).await?;
    info!("Menu updated for event: {}", event_id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _user: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event_id).await?;
    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
