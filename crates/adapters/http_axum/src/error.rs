//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roost_domain::error::CoopError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CoopError`] to an HTTP response with the appropriate status code.
pub struct ApiError(CoopError);

impl From<CoopError> for ApiError {
    fn from(err: CoopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoopError::InvalidFormat { .. } | CoopError::InvalidStatus(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            CoopError::AutomaticModeEnabled => (StatusCode::FORBIDDEN, self.0.to_string()),
            CoopError::StatusUnknown
            | CoopError::AlreadyOpened
            | CoopError::AlreadyClosed
            | CoopError::AlreadyOpening
            | CoopError::AlreadyClosing => (StatusCode::CONFLICT, self.0.to_string()),
            CoopError::ActuationFailed(_) => {
                tracing::error!(error = %self.0, "actuation error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
