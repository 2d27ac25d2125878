pub mod auth_service;
pub mod menu;
pub mod notifications;
pub mod themes;
