//! Error-to-HTTP mapping for the API layer.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use roster_core::error::RosterError;
use serde_json::json;

const REALM: &str = "user-management-service";

pub enum ApiError {
    /// Missing or invalid credentials.
    Unauthorized,
    /// A service-layer failure, mapped by taxonomy.
    Service(RosterError),
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Service(err) => match err {
                RosterError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                RosterError::AccessDenied { .. } => (StatusCode::FORBIDDEN, err.to_string()),
                RosterError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                // Internal detail never leaks to the caller.
                RosterError::Database(detail) | RosterError::Internal(detail) => {
                    tracing::error!(%detail, "internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "timestamp": Utc::now(),
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or(""),
            "message": message,
        }));

        match self {
            ApiError::Unauthorized => (
                status,
                [(
                    header::WWW_AUTHENTICATE,
                    format!("Basic realm=\"{REALM}\""),
                )],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}
