//! Error types for the HTTP gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while handling a request.
///
/// The event log itself cannot fail; every variant here describes a bad
/// request and is turned into a status code plus a short plain-text message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body could not be read, or exceeded the size limit.
    #[error("failed to read body: {0}")]
    UnreadableBody(String),

    /// The endpoint does not accept this method. Carries the hint shown to
    /// the client.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(&'static str),

    /// `/events/` was requested without an identifier.
    #[error("missing event id")]
    MissingId,

    /// The identifier segment is not an integer.
    #[error("invalid event id: {0:?}")]
    InvalidId(String),

    /// No retained event has this identifier.
    #[error("event {0} not found")]
    NotFound(i64),
}

impl GatewayError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(_) | Self::MissingId | Self::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::UnreadableBody(_) => "failed to read body",
            Self::MethodNotAllowed(hint) => *hint,
            Self::MissingId => "missing event id",
            Self::InvalidId(_) => "invalid event id",
            Self::NotFound(_) => "event not found",
        };

        (status, format!("{body}\n")).into_response()
    }
}
