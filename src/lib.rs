//! # Evently
//!
//! Event-management backend: users sign up and sign in, administrators
//! create and schedule events, users RSVP, and admins notify attendees by
//! email.
//!
//! ## Architecture
//!
//! - **auth**: JWT tokens, password hashing and the role policy
//! - **infrastructure**: database connection, entities and migrations
//! - **interfaces**: HTTP REST API (handlers, middleware, router)
//! - **notifications**: outbound reminder emails over SMTP
//! - **config**: environment-driven application configuration

pub mod auth;
pub mod config;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;

pub use config::AppConfig;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
