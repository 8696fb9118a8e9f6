//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::infrastructure::database::entities::{attendee, event};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// One entry of the caller's RSVP summary
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSummaryDto {
    pub event_id: String,
    pub event_name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub rsvp_status: String,
}

impl RsvpSummaryDto {
    pub fn new(att: attendee::Model, ev: event::Model) -> Self {
        Self {
            event_id: ev.id,
            event_name: ev.name,
            description: ev.description,
            start_date: ev.start_date,
            end_date: ev.end_date,
            location: ev.location,
            rsvp_status: att.rsvp_status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RsvpsResponse {
    pub rsvps: Vec<RsvpSummaryDto>,
}
