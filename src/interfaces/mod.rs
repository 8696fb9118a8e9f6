//! Transport interfaces

pub mod http;
