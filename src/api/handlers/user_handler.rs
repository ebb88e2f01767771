//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::{UserId, UserInput, UserResponse, UserType};
use crate::errors::AppResult;
use crate::types::UserListResponse;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "abcdef", min_length = 6)]
    pub password: String,
    /// User role tag
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// User update request; an empty or missing password keeps the current one
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana Maria")]
    pub name: String,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@x.com")]
    pub email: String,
    /// New password, or empty to keep the current one
    #[serde(default)]
    #[validate(custom(function = "validate_optional_password"))]
    #[schema(example = "")]
    pub password: String,
    /// New role tag
    #[serde(rename = "type")]
    pub user_type: UserType,
}

fn validate_optional_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() || password.chars().count() as u64 >= MIN_PASSWORD_LENGTH {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some("Password must be at least 6 characters".into());
    Err(err)
}

impl From<CreateUserRequest> for UserInput {
    fn from(req: CreateUserRequest) -> Self {
        UserInput::new(req.name, req.email, req.password, req.user_type)
    }
}

impl From<UpdateUserRequest> for UserInput {
    fn from(req: UpdateUserRequest) -> Self {
        UserInput::new(req.name, req.email, req.password, req.user_type)
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/by-email/:email", get(get_user_by_email))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or missing fields"),
        (status = 409, description = "Email already in use")
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;

    info!(user_id = %user.id, user_type = %user.user_type, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UserListResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UserListResponse>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(UserListResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(UserId::from(id)).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get user by email address
#[utoipa::path(
    get,
    path = "/api/v1/users/by-email/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email (case-insensitive)")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_email(email).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed body or missing fields"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use by another user")
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(UserId::from(id), payload.into())
        .await?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(UserResponse::from(user)))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(UserId::from(id.clone())).await?;

    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana", "email": "a@x.com", "password": "abcdef", "type": "buyer"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let short: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana", "email": "a@x.com", "password": "abc", "type": "buyer"
        }))
        .unwrap();
        assert!(short.validate().is_err());

        let bad_email: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana", "email": "not-an-email", "password": "abcdef", "type": "seller"
        }))
        .unwrap();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_create_request_requires_type() {
        let missing = serde_json::from_value::<CreateUserRequest>(serde_json::json!({
            "name": "Ana", "email": "a@x.com", "password": "abcdef"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_update_request_password_optional() {
        let keep: UpdateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana", "email": "a@x.com", "type": "buyer"
        }))
        .unwrap();
        assert!(keep.password.is_empty());
        assert!(keep.validate().is_ok());

        let short: UpdateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana", "email": "a@x.com", "password": "abc", "type": "buyer"
        }))
        .unwrap();
        assert!(short.validate().is_err());
    }
}
