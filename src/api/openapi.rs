//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::{UserResponse, UserType};
use crate::errors::ErrorResponse;
use crate::types::{HealthResponse, UserListResponse};

/// OpenAPI documentation for the user service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "1.0.0",
        description = "User management API backed by an in-memory store",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server")
    ),
    paths(
        health_handler::health_check,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::get_user_by_email,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserType,
            UserResponse,
            UserListResponse,
            HealthResponse,
            ErrorResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
