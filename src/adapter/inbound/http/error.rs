//! Error to HTTP response mapping.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::Error;

/// Status code for a failed request.
#[must_use]
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::VersionConflict { .. } => StatusCode::CONFLICT,
        Error::Unsupported { .. } => StatusCode::NOT_IMPLEMENTED,
        Error::DataUnavailable(_) | Error::FeedUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A failed request, rendered as `{"error": "..."}` with its status.
#[derive(Debug)]
pub enum ApiError {
    /// A service call failed; the status comes from [`status_for`].
    Service(Error),
    /// The request itself was malformed.
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Service(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Service(err) => (status_for(&err), err.to_string()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        if status.is_server_error() {
            error!(error = %message, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %message, status = status.as_u16(), "Request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
