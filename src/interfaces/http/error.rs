//! API error taxonomy
//!
//! Every route-level failure is converted locally into an HTTP response
//! carrying a `{"message": ...}` body; nothing is retried or escalated
//! beyond the request. Status codes follow the service's wire contract:
//! signup/signin failures answer 411, token and role failures 403,
//! duplicate RSVPs 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::notifications::mailer::MailError;

/// Application error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Incorrect format: {0}")]
    Validation(String),

    #[error("User already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Wrong password")]
    WrongPassword,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("You have already RSVP'd for this event")]
    AlreadyRsvped,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Mail dispatch failed: {0}")]
    Mail(#[from] MailError),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            // The original wire contract reports malformed signup payloads
            // and credential failures as 411.
            ApiError::Validation(_)
            | ApiError::EmailTaken
            | ApiError::InvalidCredentials
            | ApiError::WrongPassword => StatusCode::LENGTH_REQUIRED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyRsvped | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_)
            | ApiError::Hash(_)
            | ApiError::Token(_)
            | ApiError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message; internal failures are logged and masked.
    fn message(&self) -> String {
        match self {
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                "Internal Server Error".to_string()
            }
            ApiError::Hash(e) => {
                tracing::error!("password hashing error: {e}");
                "Internal Server Error".to_string()
            }
            ApiError::Token(e) => {
                tracing::error!("token error: {e}");
                "Internal Server Error".to_string()
            }
            ApiError::Mail(e) => {
                tracing::error!("mail dispatch error: {e}");
                "Error sending notification".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
