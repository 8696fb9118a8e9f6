//! Event API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, Set,
};
use tracing::info;

use super::dto::{
    AdminEventDto, AdminEventResponse, AdminEventsResponse, AttendeeDto, AttendeesResponse,
    CreateEventRequest, EventActionResponse, EventDto, EventResponse, EventWithAttendeesDto,
    EventsResponse, MessageResponse, RsvpRequest, ScheduleRequest,
};
use crate::infrastructure::database::entities::{attendee, event, user};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::notifications::mailer::{reminder_email, Mailer};

/// Event handler state
#[derive(Clone)]
pub struct EventHandlerState {
    pub db: sea_orm::DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
}

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All events, organiser expanded, attendees omitted", body = EventsResponse),
        (status = 403, description = "Missing or invalid token")
    )
)]
pub async fn list_events(
    State(state): State<EventHandlerState>,
) -> Result<Json<EventsResponse>, ApiError> {
    let rows = event::Entity::find()
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    let events: Vec<EventDto> = rows
        .into_iter()
        .map(|(ev, organiser)| EventDto::new(ev, organiser))
        .collect();

    Ok(Json(EventsResponse { events }))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event details, attendees omitted", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let row = event::Entity::find_by_id(&event_id)
        .find_also_related(user::Entity)
        .one(&state.db)
        .await?;

    let Some((ev, organiser)) = row else {
        return Err(ApiError::NotFound("Event"));
    };

    Ok(Json(EventResponse {
        event: EventDto::new(ev, organiser),
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/admin",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Events organised by the calling admin", body = AdminEventsResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_admin_events(
    State(state): State<EventHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<AdminEventsResponse>, ApiError> {
    let events = event::Entity::find()
        .filter(event::Column::OrganiserId.eq(&caller.user_id))
        .all(&state.db)
        .await?;

    Ok(Json(AdminEventsResponse {
        events: events.into_iter().map(AdminEventDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/admin/{event_id}",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event details, attendees omitted", body = AdminEventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_admin_event(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
) -> Result<Json<AdminEventResponse>, ApiError> {
    // Any admin may fetch any event here; only the listing filters by
    // organiser.
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    Ok(Json(AdminEventResponse {
        event: AdminEventDto::from(ev),
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/admin/{event_id}/attendees",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event with attendees expanded to email and name", body = AttendeesResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_attendees(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
) -> Result<Json<AttendeesResponse>, ApiError> {
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    let rows = attendee::Entity::find()
        .filter(attendee::Column::EventId.eq(&ev.id))
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    let attendees: Vec<AttendeeDto> = rows
        .into_iter()
        .filter_map(|(att, u)| u.map(|u| AttendeeDto::new(att, u)))
        .collect();

    Ok(Json(AttendeesResponse {
        event: EventWithAttendeesDto::new(ev, attendees),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/events/admin/{event_id}/attendees/{user_id}",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(
        ("event_id" = String, Path, description = "Event id"),
        ("user_id" = String, Path, description = "Attendee user id")
    ),
    responses(
        (status = 200, description = "Attendee removed (success even if absent)", body = MessageResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn remove_attendee(
    State(state): State<EventHandlerState>,
    Path((event_id, user_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    // Keyed delete; removing an absent attendee is a silent no-op.
    attendee::Entity::delete_by_id((ev.id, user_id))
        .exec(&state.db)
        .await?;

    Ok(Json(MessageResponse {
        message: "Attendee removed successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/events/admin/create",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created with organiser = caller", body = EventActionResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn create_event(
    State(state): State<EventHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventActionResponse>), ApiError> {
    let new_event = event::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(request.name),
        description: Set(request.description),
        location: Set(request.location),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        organiser_id: Set(caller.user_id),
    };
    let ev = new_event.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventActionResponse {
            message: "Event created successfully".to_string(),
            event: AdminEventDto::from(ev),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/events/admin/{event_id}/schedule",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Both dates overwritten", body = EventActionResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn schedule_event(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<EventActionResponse>, ApiError> {
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    // Both dates are overwritten; no ordering check between start and end.
    let mut active: event::ActiveModel = ev.into();
    active.start_date = Set(request.start_date);
    active.end_date = Set(request.end_date);
    let ev = active.update(&state.db).await?;

    Ok(Json(EventActionResponse {
        message: "Event schedule updated successfully".to_string(),
        event: AdminEventDto::from(ev),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/events/admin/delete/{event_id}",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event and its attendee list removed", body = MessageResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    ev.delete(&state.db).await?;

    Ok(Json(MessageResponse {
        message: "Event deleted".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/rsvp",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    request_body = RsvpRequest,
    responses(
        (status = 200, description = "RSVP recorded", body = MessageResponse),
        (status = 400, description = "Already RSVP'd or invalid status"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn rsvp(
    State(state): State<EventHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(event_id): Path<String>,
    Json(request): Json<RsvpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = attendee::RsvpStatus::parse(&request.status).ok_or_else(|| {
        ApiError::BadRequest("status must be one of yes, no, maybe".to_string())
    })?;

    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    let existing = attendee::Entity::find_by_id((ev.id.clone(), caller.user_id.clone()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::AlreadyRsvped);
    }

    let new_attendee = attendee::ActiveModel {
        event_id: Set(ev.id),
        user_id: Set(caller.user_id),
        rsvp_status: Set(status),
        responded_at: Set(Utc::now()),
    };

    // The primary key backstops the check above: a concurrent duplicate
    // loses the insert instead of appending a second record.
    let insert = attendee::Entity::insert(new_attendee)
        .on_conflict(
            OnConflict::columns([attendee::Column::EventId, attendee::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec(&state.db)
        .await;
    match insert {
        Ok(_) => {}
        Err(DbErr::RecordNotInserted) => return Err(ApiError::AlreadyRsvped),
        Err(e) => return Err(e.into()),
    }

    Ok(Json(MessageResponse {
        message: "RSVP successful".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/notify",
    tag = "Events (admin)",
    security(("bearer_auth" = [])),
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Reminder dispatched to all attendees", body = MessageResponse),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Mail dispatch failed")
    )
)]
pub async fn notify_attendees(
    State(state): State<EventHandlerState>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ev = event::Entity::find_by_id(&event_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    let rows = attendee::Entity::find()
        .filter(attendee::Column::EventId.eq(&ev.id))
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    let recipients: Vec<String> = rows
        .into_iter()
        .filter_map(|(_, u)| u.map(|u| u.email))
        .collect();

    if recipients.is_empty() {
        info!(event = %ev.id, "no attendees to notify");
        return Ok(Json(MessageResponse {
            message: "Notification sent successfully".to_string(),
        }));
    }

    let (subject, body) = reminder_email(&ev);
    state.mailer.send(&recipients, &subject, &body).await?;
    info!(event = %ev.id, recipients = recipients.len(), "reminder dispatched");

    Ok(Json(MessageResponse {
        message: "Notification sent successfully".to_string(),
    }))
}
