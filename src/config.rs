//! Configuration module
//!
//! Everything is read from environment variables (a `.env` file is loaded
//! by `main` before this runs): database connection string, JWT signing
//! secret, listen address and outbound-mail credentials.

use crate::auth::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;
use crate::notifications::mailer::EmailConfig;

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen host address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// SMTP settings for attendee notifications
    pub email: EmailConfig,
}

impl AppConfig {
    /// Assemble the configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
