//! # HTTP Errors
//!
//! Maps pipeline failures onto status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::results::ResultsError;

/// Result type for HTTP handlers
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// No collection is registered under the requested route name
    #[error("Collection not found: {0}")]
    UnknownCollection(String),

    /// Query or store failure from the list pipeline
    #[error(transparent)]
    Results(#[from] ResultsError),
}

impl HttpError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            HttpError::Results(ResultsError::Query(_)) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            HttpError::UnknownCollection(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            HttpError::Results(ResultsError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<HttpError> for ErrorResponse {
    fn from(err: HttpError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "list request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
