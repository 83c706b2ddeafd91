use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every business failure the services can produce. Handlers never build
/// status codes themselves; the single translation to HTTP lives in
/// `into_response` below.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Admin not found")]
    NotFound,

    #[error("Admin already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authorized")]
    Unauthorized,

    #[error("No OTP requested")]
    NoPendingOtp,

    #[error("OTP expired")]
    OtpExpired,

    #[error("Invalid OTP")]
    OtpMismatch,

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

impl From<mail_send::Error> for ServiceError {
    fn from(err: mail_send::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::AlreadyExists => StatusCode::CONFLICT,
            ServiceError::InvalidCredentials | ServiceError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::NoPendingOtp
            | ServiceError::OtpExpired
            | ServiceError::OtpMismatch => StatusCode::BAD_REQUEST,
            ServiceError::Upstream(msg) => {
                tracing::warn!("upstream failure: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            // Never echo collaborator internals to the client
            ServiceError::Upstream(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}
