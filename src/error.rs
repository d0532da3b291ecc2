use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the repositories and the account service. Handlers
/// map these 1:1 to status codes; nothing retries inside the core.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user already exists")]
    DuplicateUser,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("user does not exist")]
    UserNotFound,
    #[error("storage unavailable")]
    Storage(#[source] sqlx::Error),
    #[error("internal error")]
    Credential(#[source] anyhow::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Storage(e)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::DuplicateUser => StatusCode::CONFLICT,
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::UserNotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServiceError::Credential(e) => {
                tracing::error!(error = %e, "credential store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
