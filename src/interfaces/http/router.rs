//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::middleware::{admin_middleware, auth_middleware, AuthState};
use super::modules::{events, health, users};
use crate::auth::jwt::JwtConfig;
use crate::interfaces::http::error::ErrorBody;
use crate::notifications::mailer::Mailer;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users::signup,
        users::signin,
        users::list_rsvps,
        // Events
        events::list_events,
        events::get_event,
        events::rsvp,
        // Events (admin)
        events::list_admin_events,
        events::get_admin_event,
        events::get_event_attendees,
        events::remove_attendee,
        events::create_event,
        events::schedule_event,
        events::delete_event,
        events::notify_attendees,
    ),
    components(
        schemas(
            ErrorBody,
            // Users
            users::SignupRequest,
            users::SigninRequest,
            users::TokenResponse,
            users::RsvpSummaryDto,
            users::RsvpsResponse,
            // Events
            events::OrganiserDto,
            events::EventDto,
            events::AdminEventDto,
            events::AttendeeUserDto,
            events::AttendeeDto,
            events::EventWithAttendeesDto,
            events::CreateEventRequest,
            events::ScheduleRequest,
            events::RsvpRequest,
            events::EventsResponse,
            events::EventResponse,
            events::AdminEventsResponse,
            events::AdminEventResponse,
            events::AttendeesResponse,
            events::EventActionResponse,
            events::MessageResponse,
            // Health
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "Signup, signin and the caller's RSVP summary"),
        (name = "Events", description = "Event listing and RSVPs for authenticated users"),
        (name = "Events (admin)", description = "Event management: create, schedule, delete, attendees, notifications"),
    ),
    info(
        title = "Evently Event Management API",
        version = "1.0.0",
        description = "REST API for managing events, RSVPs and attendee notifications",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    mailer: Arc<dyn Mailer>,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let user_state = users::UserHandlerState {
        db: db.clone(),
        jwt_config,
    };

    let event_state = events::EventHandlerState { db, mailer };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // User routes (public)
    let user_routes = Router::new()
        .route("/signup", post(users::signup))
        .route("/signin", post(users::signin))
        .with_state(user_state.clone());

    // User routes (authenticated)
    let user_protected_routes = Router::new()
        .route("/{user_id}/rsvps", get(users::list_rsvps))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Event routes for any authenticated user
    let event_routes = Router::new()
        .route("/", get(events::list_events))
        .route("/{event_id}", get(events::get_event))
        .route("/{event_id}/rsvp", post(events::rsvp))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(event_state.clone());

    // Event routes behind the stacked auth + admin gates
    let event_admin_routes = Router::new()
        .route("/admin", get(events::list_admin_events))
        .route("/admin/create", post(events::create_event))
        .route("/admin/{event_id}", get(events::get_admin_event))
        .route(
            "/admin/{event_id}/attendees",
            get(events::get_event_attendees),
        )
        .route(
            "/admin/{event_id}/attendees/{user_id}",
            delete(events::remove_attendee),
        )
        .route("/admin/{event_id}/schedule", put(events::schedule_event))
        .route("/admin/delete/{event_id}", delete(events::delete_event))
        .route("/{event_id}/notify", post(events::notify_attendees))
        // Layers run outermost first: auth decodes the caller, admin checks
        // the role it attached.
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(event_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Users
        .nest("/api/user", user_routes)
        .nest("/api/user", user_protected_routes)
        // Events
        .nest("/api/events", event_routes)
        .nest("/api/events", event_admin_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, verify_token, Claims};
    use crate::auth::password::hash_password;
    use crate::infrastructure::database::entities::{attendee, user};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::notifications::mailer::MailError;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Duration, Utc};
    use http_body_util::BodyExt;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
        PaginatorTrait, QueryFilter, Set,
    };
    use sea_orm_migration::MigratorTrait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Mailer that records every dispatch instead of talking SMTP.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(Vec<String>, String, String)>>,
    }

    #[async_trait::async_trait]
    impl Mailer for RecordingMailer {
        async fn send(
            &self,
            recipients: &[String],
            subject: &str,
            body: &str,
        ) -> Result<(), MailError> {
            self.sent.lock().unwrap().push((
                recipients.to_vec(),
                subject.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
        }
    }

    async fn test_app() -> (Router, DatabaseConnection, Arc<RecordingMailer>) {
        // A single pooled connection keeps the whole test on one in-memory
        // database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let app = create_api_router(db.clone(), test_jwt(), mailer.clone());
        (app, db, mailer)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn signup(app: &Router, name: &str, email: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/user/signup",
            None,
            Some(json!({"name": name, "email": email, "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Insert an admin directly and mint a token for it.
    async fn seed_admin(db: &DatabaseConnection, email: &str) -> (String, String) {
        let id = uuid::Uuid::new_v4().to_string();
        user::ActiveModel {
            id: Set(id.clone()),
            name: Set("Ada Admin".to_string()),
            email: Set(email.to_string()),
            password_hash: Set(hash_password("admin-pass").unwrap()),
            role: Set(user::UserRole::Admin),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
        let token = create_token(&id, "admin", &test_jwt()).unwrap();
        (id, token)
    }

    async fn create_event(app: &Router, token: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/events/admin/create",
            Some(token),
            Some(json!({
                "name": "Rust Meetup",
                "description": "Monthly meetup",
                "location": "Main Hall",
                "startDate": "2024-01-01T18:00:00Z",
                "endDate": "2024-01-01T21:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["event"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn signup_issues_user_role_token() {
        let (app, _db, _) = test_app().await;
        let token = signup(&app, "Bob", "bob@example.com").await;

        let claims = verify_token(&token, &test_jwt()).unwrap();
        assert_eq!(claims.role, "user");
        assert!(!claims.sub.is_empty());
    }

    #[tokio::test]
    async fn signup_rejects_malformed_payload() {
        let (app, _db, _) = test_app().await;

        // Short password
        let (status, _) = send(
            &app,
            "POST",
            "/api/user/signup",
            None,
            Some(json!({"name": "Bob", "email": "bob@example.com", "password": "short"})),
        )
        .await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);

        // Invalid email
        let (status, _) = send(
            &app,
            "POST",
            "/api/user/signup",
            None,
            Some(json!({"name": "Bob", "email": "not-an-email", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let (app, _db, _) = test_app().await;
        signup(&app, "Bob", "bob@example.com").await;

        // Same email, different casing and other fields
        let (status, body) = send(
            &app,
            "POST",
            "/api/user/signup",
            None,
            Some(json!({"name": "Robert", "email": "Bob@Example.com", "password": "different1"})),
        )
        .await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn signin_requires_matching_credentials() {
        let (app, _db, _) = test_app().await;
        signup(&app, "Bob", "bob@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/user/signin",
            None,
            Some(json!({"email": "nobody@example.com", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, body) = send(
            &app,
            "POST",
            "/api/user/signin",
            None,
            Some(json!({"email": "bob@example.com", "password": "wrong-pass"})),
        )
        .await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
        assert_eq!(body["message"], "Wrong password");

        let (status, body) = send(
            &app,
            "POST",
            "/api/user/signin",
            None,
            Some(json!({"email": "bob@example.com", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let claims = verify_token(body["token"].as_str().unwrap(), &test_jwt()).unwrap();
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn auth_gate_rejects_missing_bad_and_expired_tokens() {
        let (app, _db, _) = test_app().await;

        let (status, _) = send(&app, "GET", "/api/events", None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", "/api/events", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Token expired beyond validation leeway
        let now = Utc::now();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "user".to_string(),
            exp: (now - Duration::minutes(10)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
        };
        let expired = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(test_jwt().secret.as_bytes()),
        )
        .unwrap();
        let (status, _) = send(&app, "GET", "/api/events", Some(&expired), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_gate_rejects_user_role_on_every_admin_route() {
        let (app, _db, _) = test_app().await;
        let token = signup(&app, "Bob", "bob@example.com").await;

        let routes = [
            ("GET", "/api/events/admin"),
            ("GET", "/api/events/admin/some-id"),
            ("GET", "/api/events/admin/some-id/attendees"),
            ("DELETE", "/api/events/admin/some-id/attendees/other-id"),
            ("POST", "/api/events/admin/create"),
            ("PUT", "/api/events/admin/some-id/schedule"),
            ("DELETE", "/api/events/admin/delete/some-id"),
            ("POST", "/api/events/some-id/notify"),
        ];
        for (method, uri) in routes {
            let (status, body) = send(&app, method, uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
            assert_eq!(body["message"], "Access denied. Requires Admin Role");
        }
    }

    #[tokio::test]
    async fn listings_expand_organiser_and_omit_attendees() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;

        let user_token = signup(&app, "Bob", "bob@example.com").await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/api/events", Some(&user_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let events = body["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["organiser"]["name"], "Ada Admin");
        assert!(events[0].get("attendees").is_none());

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/events/{event_id}"),
            Some(&user_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["organiser"]["name"], "Ada Admin");
        assert!(body["event"].get("attendees").is_none());
    }

    #[tokio::test]
    async fn get_missing_event_is_404() {
        let (app, _db, _) = test_app().await;
        let token = signup(&app, "Bob", "bob@example.com").await;

        let (status, body) = send(&app, "GET", "/api/events/nope", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Event not found");
    }

    #[tokio::test]
    async fn admin_listing_is_scoped_to_caller() {
        let (app, db, _) = test_app().await;
        let (ada_id, ada_token) = seed_admin(&db, "ada@example.com").await;
        let (_, eve_token) = seed_admin(&db, "eve@example.com").await;
        let event_id = create_event(&app, &ada_token).await;

        let (status, body) = send(&app, "GET", "/api/events/admin", Some(&ada_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"].as_array().unwrap().len(), 1);
        assert_eq!(body["events"][0]["organiser"], ada_id.as_str());

        let (status, body) = send(&app, "GET", "/api/events/admin", Some(&eve_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"].as_array().unwrap().len(), 0);

        // The other admin organised nothing, but can still fetch any
        // event's detail by id
        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/events/admin/{event_id}"),
            Some(&eve_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["id"], event_id.as_str());
    }

    #[tokio::test]
    async fn rsvp_is_recorded_once_per_user() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "maybe"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "You have already RSVP'd for this event");

        let count = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(&event_id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn rsvp_validates_status_and_event() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "definitely"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/events/nope/rsvp",
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn attendees_view_expands_user_email_and_name() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;
        send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "maybe"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/events/admin/{event_id}/attendees"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let attendees = body["event"]["attendees"].as_array().unwrap();
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0]["user"]["email"], "bob@example.com");
        assert_eq!(attendees[0]["user"]["name"], "Bob");
        assert_eq!(attendees[0]["rsvpStatus"], "maybe");
    }

    #[tokio::test]
    async fn removing_attendee_is_idempotent() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;
        send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;
        let user_id = verify_token(&user_token, &test_jwt()).unwrap().sub;

        // Removing someone who never RSVP'd succeeds
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/events/admin/{event_id}/attendees/stranger"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Removing the real attendee empties the list
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/events/admin/{event_id}/attendees/{user_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let count = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(&event_id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(count, 0);

        // And doing it again is still a success
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/events/admin/{event_id}/attendees/{user_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // But a missing event is an error
        let (status, _) = send(
            &app,
            "DELETE",
            "/api/events/admin/nope/attendees/whoever",
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn schedule_overwrites_both_dates() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/events/admin/{event_id}/schedule"),
            Some(&admin_token),
            Some(json!({"startDate": "2024-01-01T00:00:00Z", "endDate": "2024-01-02T00:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/events/admin/{event_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let start: DateTime<Utc> = body["event"]["startDate"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        let end: DateTime<Utc> = body["event"]["endDate"].as_str().unwrap().parse().unwrap();
        assert_eq!(start, "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(end, "2024-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap());

        let (status, _) = send(
            &app,
            "PUT",
            "/api/events/admin/nope/schedule",
            Some(&admin_token),
            Some(json!({"startDate": "2024-01-01T00:00:00Z", "endDate": "2024-01-02T00:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_event_is_gone() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;
        send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/events/admin/delete/{event_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/events/{event_id}"),
            Some(&user_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Attendee rows went with the event
        let count = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(&event_id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(count, 0);

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/events/admin/delete/{event_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rsvps_summary_reports_the_callers_status() {
        let (app, db, _) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;
        send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;
        let user_id = verify_token(&user_token, &test_jwt()).unwrap().sub;

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/user/{user_id}/rsvps"),
            Some(&user_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rsvps = body["rsvps"].as_array().unwrap();
        assert_eq!(rsvps.len(), 1);
        assert_eq!(rsvps[0]["eventId"], event_id.as_str());
        assert_eq!(rsvps[0]["eventName"], "Rust Meetup");
        assert_eq!(rsvps[0]["location"], "Main Hall");
        assert_eq!(rsvps[0]["rsvpStatus"], "yes");
    }

    #[tokio::test]
    async fn notify_dispatches_reminder_to_attendees() {
        let (app, db, mailer) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;
        let user_token = signup(&app, "Bob", "bob@example.com").await;
        send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/rsvp"),
            Some(&user_token),
            Some(json!({"status": "yes"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/notify"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Notification sent successfully");

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (recipients, subject, mail_body) = &sent[0];
        assert_eq!(recipients, &vec!["bob@example.com".to_string()]);
        assert_eq!(subject, "Reminder: Rust Meetup");
        assert!(mail_body.contains("Location: Main Hall"));
    }

    #[tokio::test]
    async fn notify_without_attendees_is_a_noop_success() {
        let (app, db, mailer) = test_app().await;
        let (_, admin_token) = seed_admin(&db, "ada@example.com").await;
        let event_id = create_event(&app, &admin_token).await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/events/{event_id}/notify"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(mailer.sent.lock().unwrap().is_empty());

        let (status, _) = send(&app, "POST", "/api/events/nope/notify", Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let (app, _db, _) = test_app().await;
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
