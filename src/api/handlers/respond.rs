use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use crate::api::dtos::requests::SelectionForm;
use crate::domain::models::selection::Selection;
use crate::domain::services::{menu, themes};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info};

pub const STATUS_INVITE_NOT_FOUND: &str = "invite-not-found";
pub const STATUS_ALREADY_USED: &str = "already-used";
pub const STATUS_INVALID_SELECTION: &str = "invalid-selection";

#[derive(Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

fn status_message(status: &str) -> Option<&'static str> {
    match status {
        STATUS_INVITE_NOT_FOUND => Some("That invite link doesn't seem to exist."),
        STATUS_ALREADY_USED => Some("This invite has already been answered."),
        STATUS_INVALID_SELECTION => {
            Some("One of your picks is no longer on the menu. Please choose again.")
        }
        _ => None,
    }
}

fn error_page(state: &AppState, status: StatusCode, message: &str) -> Response {
    let mut ctx = Context::new();
    ctx.insert("message", message);
    match state.templates.render("error.html", &ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Error template render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.").into_response()
        }
    }
}

pub async fn show_invite(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Response, AppError> {
    let Some(invite) = state.invite_repo.find_by_token(&token).await? else {
        return Ok(error_page(&state, StatusCode::NOT_FOUND, "That invite link doesn't seem to exist."));
    };

    let Some(event) = state.event_repo.find_by_id(&invite.event_id).await? else {
        return Ok(error_page(&state, StatusCode::NOT_FOUND, "The event for this invite no longer exists."));
    };

    let Some(theme) = themes::find(&event.theme) else {
        error!("Event {} references unknown theme '{}'", event.id, event.theme);
        return Ok(error_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong on our side."));
    };

    let mut ctx = Context::new();
    ctx.insert("event_title", &event.title);
    ctx.insert("theme_name", theme.display_name);
    ctx.insert("theme_tagline", theme.tagline);
    ctx.insert("blurb", &event.blurb);
    ctx.insert("event_date", &event.event_date.map(|d| d.to_string()));
    ctx.insert("menu", &event.menu());
    ctx.insert("used", &invite.is_used());
    ctx.insert("token", &invite.token);
    ctx.insert("status_message", &query.status.as_deref().and_then(status_message));

    let html = state.templates.render("invite.html", &ctx)
        .map_err(|e| AppError::InternalWithMsg(format!("Invite template render failed: {}", e)))?;

    Ok(Html(html).into_response())
}

pub async fn submit_selection(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Form(form): Form<SelectionForm>,
) -> Result<Response, AppError> {
    let back = |status: &str| {
        Redirect::to(&format!("/invite/{}?status={}", token, status)).into_response()
    };

    let Some(invite) = state.invite_repo.find_by_token(&token).await? else {
        return Ok(back(STATUS_INVITE_NOT_FOUND));
    };

    if invite.is_used() {
        return Ok(back(STATUS_ALREADY_USED));
    }

    // Defensive re-fetch: a deleted event races invite resolution.
    let Some(event) = state.event_repo.find_by_id(&invite.event_id).await? else {
        return Ok(back(STATUS_INVITE_NOT_FOUND));
    };

    // Validated against the menu as stored right now, not whatever copy the
    // client rendered. An edit between page load and submit counts.
    let current_menu = event.menu();
    if menu::validate_selection(&current_menu, &form.dinner_choice, &form.activity_choice, &form.mood_choice).is_err() {
        return Ok(back(STATUS_INVALID_SELECTION));
    }

    let notes = form.notes.filter(|n| !n.trim().is_empty());
    let selection = Selection::new(
        invite.id.clone(),
        form.dinner_choice,
        form.activity_choice,
        form.mood_choice,
        notes,
    );

    let recorded = match state.selection_repo.record(&selection).await {
        Ok(recorded) => recorded,
        // A concurrent submission won the race; the storage constraint is
        // the tie-breaker.
        Err(AppError::AlreadyUsed) => return Ok(back(STATUS_ALREADY_USED)),
        Err(e) => return Err(e),
    };

    info!("Selection recorded for invite {} (event {})", invite.id, event.id);

    // Outside the commit boundary: delivery failures are warnings only.
    state.notifications.dispatch_selection(&event, &invite, &recorded).await;

    let mut ctx = Context::new();
    ctx.insert("event_title", &event.title);
    ctx.insert("dinner", &recorded.dinner);
    ctx.insert("activity", &recorded.activity);
    ctx.insert("mood", &recorded.mood);
    ctx.insert("notes", &recorded.notes);

    let html = state.templates.render("thanks.html", &ctx)
        .map_err(|e| AppError::InternalWithMsg(format!("Thanks template render failed: {}", e)))?;

    Ok(Html(html).into_response())
}
