use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use astra_core::Error;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// Maps a component error to a stable code and a message safe to show callers.
/// Upstream bodies and transport details are only logged.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError(Error::Validation(message.into()))
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match &self.0 {
            Error::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message.clone())
            }
            Error::UpstreamTransport { service, .. } => (
                StatusCode::BAD_GATEWAY,
                "upstream_unreachable",
                format!("The {} service could not be reached", service),
            ),
            Error::UpstreamStatus { service, status, .. } => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                format!("The {} service returned status {}", service, status),
            ),
            Error::Parse(_) => (
                StatusCode::BAD_GATEWAY,
                "upstream_invalid_response",
                "An upstream service returned an unexpected response".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, "Request failed: {}", self.0);
        } else {
            tracing::warn!(code, "Request rejected: {}", self.0);
        }
        (status, Json(ErrorBody { error, code })).into_response()
    }
}
