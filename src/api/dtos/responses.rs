use crate::domain::models::{event::Menu, invite::Invite, selection::Selection};
use serde::Serialize;

#[derive(Serialize)]
pub struct ThemeResponse {
    pub id: &'static str,
    pub display_name: &'static str,
    pub tagline: &'static str,
    pub default_menu: Menu,
}

#[derive(Serialize)]
pub struct IssuedInviteResponse {
    #[serde(flatten)]
    pub invite: Invite,
    pub invite_url: String,
}

#[derive(Serialize)]
pub struct InviteWithSelection {
    #[serde(flatten)]
    pub invite: Invite,
    pub selection: Option<Selection>,
}
