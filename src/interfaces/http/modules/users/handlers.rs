//! User API handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use validator::Validate;

use super::dto::{RsvpSummaryDto, RsvpsResponse, SigninRequest, SignupRequest, TokenResponse};
use crate::auth::jwt::{create_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::{attendee, event, user};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::middleware::AuthenticatedUser;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub db: sea_orm::DatabaseConnection,
    pub jwt_config: JwtConfig,
}

/// Flatten validator errors into one message line.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let fields: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{:?}", e.code));
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if fields.is_empty() {
        "invalid payload".to_string()
    } else {
        fields.join("; ")
    }
}

#[utoipa::path(
    post,
    path = "/api/user/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created, token issued", body = TokenResponse),
        (status = 411, description = "Malformed payload or email already registered")
    )
)]
pub async fn signup(
    State(state): State<UserHandlerState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(validation_message(&e)))?;

    let email = request.email.trim().to_lowercase();

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_password(&request.password)?;
    let user_id = uuid::Uuid::new_v4().to_string();
    let role = user::UserRole::User;

    let new_user = user::ActiveModel {
        id: Set(user_id.clone()),
        name: Set(request.name.trim().to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role.clone()),
        created_at: Set(Utc::now()),
    };
    new_user.insert(&state.db).await?;

    let token = create_token(&user_id, role.as_str(), &state.jwt_config)?;
    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/user/signin",
    tag = "Users",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 411, description = "Unknown email or wrong password")
    )
)]
pub async fn signin(
    State(state): State<UserHandlerState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(ApiError::WrongPassword);
    }

    let token = create_token(&user.id, user.role.as_str(), &state.jwt_config)?;
    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/user/{user_id}/rsvps",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = String, Path, description = "Ignored; the answer is for the token's user")),
    responses(
        (status = 200, description = "RSVP summary for the calling user", body = RsvpsResponse),
        (status = 403, description = "Missing or invalid token")
    )
)]
pub async fn list_rsvps(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    // The path carries a user id but the answer is always for the caller.
    Path(_user_id): Path<String>,
) -> Result<Json<RsvpsResponse>, ApiError> {
    let rows = attendee::Entity::find()
        .filter(attendee::Column::UserId.eq(&caller.user_id))
        .find_also_related(event::Entity)
        .all(&state.db)
        .await?;

    let rsvps: Vec<RsvpSummaryDto> = rows
        .into_iter()
        .filter_map(|(att, ev)| ev.map(|ev| RsvpSummaryDto::new(att, ev)))
        .collect();

    Ok(Json(RsvpsResponse { rsvps }))
}
