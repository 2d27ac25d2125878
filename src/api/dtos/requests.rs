use crate::domain::models::event::Menu;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub theme: String,
    pub event_date: Option<NaiveDate>,
    /// Overrides the theme's default menu when present.
    pub menu: Option<Menu>,
    pub blurb: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMenuRequest {
    pub dinner: Vec<String>,
    pub activity: Vec<String>,
    pub mood: Vec<String>,
    pub blurb: Option<String>,
}

#[derive(Deserialize)]
pub struct IssueInviteRequest {
    pub email: Option<String>,
}

/// The recipient-facing response form. Field names match the public form
/// inputs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionForm {
    pub dinner_choice: String,
    pub activity_choice: String,
    pub mood_choice: String,
    pub notes: Option<String>,
}
