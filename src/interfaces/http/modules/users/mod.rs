//! Users module — signup, signin, RSVP listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
