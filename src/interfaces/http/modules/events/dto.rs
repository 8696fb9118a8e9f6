//! Event DTOs
//!
//! Two projections of an event exist on the wire: the general one with the
//! organiser expanded to a name, and the admin one with the organiser as a
//! raw id. Neither carries the attendee list; attendees appear only in the
//! dedicated admin attendees view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infrastructure::database::entities::{attendee, event, user};

/// Organiser reference expanded to a display name
#[derive(Debug, Serialize, ToSchema)]
pub struct OrganiserDto {
    pub id: String,
    pub name: String,
}

/// Event as shown to any authenticated user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organiser: OrganiserDto,
}

impl EventDto {
    pub fn new(ev: event::Model, organiser: Option<user::Model>) -> Self {
        let organiser = OrganiserDto {
            id: ev.organiser_id.clone(),
            name: organiser.map(|u| u.name).unwrap_or_default(),
        };
        Self {
            id: ev.id,
            name: ev.name,
            description: ev.description,
            location: ev.location,
            start_date: ev.start_date,
            end_date: ev.end_date,
            organiser,
        }
    }
}

/// Event as shown on the admin surface (organiser as raw id)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminEventDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organiser: String,
}

impl From<event::Model> for AdminEventDto {
    fn from(ev: event::Model) -> Self {
        Self {
            id: ev.id,
            name: ev.name,
            description: ev.description,
            location: ev.location,
            start_date: ev.start_date,
            end_date: ev.end_date,
            organiser: ev.organiser_id,
        }
    }
}

/// Attendee's user reference expanded to email and name
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeeUserDto {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
    pub user: AttendeeUserDto,
    pub rsvp_status: String,
}

impl AttendeeDto {
    pub fn new(att: attendee::Model, u: user::Model) -> Self {
        Self {
            user: AttendeeUserDto {
                email: u.email,
                name: u.name,
            },
            rsvp_status: att.rsvp_status.as_str().to_string(),
        }
    }
}

/// Admin attendees view: the event with its attendee list expanded
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithAttendeesDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organiser: String,
    pub attendees: Vec<AttendeeDto>,
}

impl EventWithAttendeesDto {
    pub fn new(ev: event::Model, attendees: Vec<AttendeeDto>) -> Self {
        Self {
            id: ev.id,
            name: ev.name,
            description: ev.description,
            location: ev.location,
            start_date: ev.start_date,
            end_date: ev.end_date,
            organiser: ev.organiser_id,
            attendees,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RsvpRequest {
    /// One of `yes`, `no`, `maybe`
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventsResponse {
    pub events: Vec<EventDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub event: EventDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminEventsResponse {
    pub events: Vec<AdminEventDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminEventResponse {
    pub event: AdminEventDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeesResponse {
    pub event: EventWithAttendeesDto,
}

/// Mutation acknowledgement carrying the touched event
#[derive(Debug, Serialize, ToSchema)]
pub struct EventActionResponse {
    pub message: String,
    pub event: AdminEventDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
