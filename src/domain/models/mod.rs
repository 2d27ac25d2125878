pub mod event;
pub mod invite;
pub mod selection;
pub mod session;
