//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor for the user routes.
///
/// A body that is not JSON, misses a field, carries an unknown `type` or
/// breaks a `validator` rule is rejected with `AppError::Validation`, so
/// every bad request answers 400 with an `{"erro": ...}` body.
///
/// # Example
///
/// ```rust,ignore
/// use user_service::api::handlers::user_handler::CreateUserRequest;
///
/// async fn create_user(
///     State(state): State<AppState>,
///     ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
/// ) -> AppResult<(StatusCode, Json<UserResponse>)> {
///     // name non-empty, email well-formed, password >= 6 chars
///     let user = state.user_service.create_user(payload.into()).await?;
///     Ok((StatusCode::CREATED, Json(user.into())))
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // HashMap iteration order is arbitrary
    messages.sort();
    messages.join(", ")
}
