pub mod sqlite_event_repo;
pub mod sqlite_invite_repo;
pub mod sqlite_selection_repo;
pub mod sqlite_session_repo;

pub mod postgres_event_repo;
pub mod postgres_invite_repo;
pub mod postgres_selection_repo;
pub mod postgres_session_repo;
