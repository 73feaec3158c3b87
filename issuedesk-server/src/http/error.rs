//! API error types with IntoResponse
//!
//! Errors are rendered as failed envelopes with the status of the layer that
//! produced them. The router never recovers locally.

use axum::extract::rejection::BytesRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::envelope::Envelope;
use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required fields missing (400, echoes the payload)
    #[error(transparent)]
    Validation(ValidationError),

    /// Content-Type other than exactly `application/json` (400)
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// Body is not valid JSON for the expected shape (400)
    #[error("request body invalid: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// Body could not be read, e.g. over the size limit (status from the rejection)
    #[error("request body invalid: {0}")]
    BodyRejected(#[source] BytesRejection),

    /// Method not handled for the matched route (405)
    #[error("unsupported method: {method} /issue/{slug}")]
    MethodNotAllowed { method: Method, slug: String },

    /// No route matched the request path (404)
    #[error("no route: {method} {path}")]
    NoRoute { method: Method, path: String },

    /// Connection, query or exec failure (500, logged)
    #[error(transparent)]
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UnsupportedContentType { .. } | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BodyRejected(e) => e.status(),
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NoRoute { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let data = match &self {
            Self::Validation(e) => e.payload().cloned(),
            _ => None,
        };

        Envelope::<Value>::failure(self.to_string(), data).with_status(status)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        Self::BodyRejected(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Validation(e) => Self::Validation(e),
            _ => Self::Database(e),
        }
    }
}
