//! Client-visible error responses.
//!
//! Every failure is terminal for the request and renders as
//! `{"error": "<message>"}` with the matching status code.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Errors returned by the fixture handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Login with a credential pair other than the configured one.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session cookie, or one that names no live session.
    #[error("Unauthorized")]
    Unauthorized,

    /// The login body was not a JSON object with `username` and `password`.
    ///
    /// The detail is for logs only; clients see a fixed message.
    #[error("Invalid request")]
    MalformedRequest(String),

    /// A known path requested with a method it does not serve.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// JSON body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}
