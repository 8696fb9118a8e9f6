//! HTTP REST API interfaces
//!
//! - `middleware`: Bearer-token and admin gates
//! - `modules`: Request handlers and DTOs per resource
//! - `error`: API error taxonomy
//! - `router`: API router with Swagger documentation

pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
