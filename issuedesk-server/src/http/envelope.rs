//! Response envelope
//!
//! Every response body, success or failure, has the same shape:
//!
//! ```json
//! { "success": true, "data": ..., "error": null }
//! ```
//!
//! Handlers return [`ApiResult<T>`]; the `Ok` arm renders through
//! [`Envelope::success`] and the `Err` arm through
//! [`ApiError`](super::ApiError)'s `IntoResponse`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::ApiError;

/// Handler result rendered as an envelope either way
pub type ApiResult<T> = Result<Envelope<T>, ApiError>;

/// Uniform `{success, data, error}` response body
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope; `data` carries diagnostics such as a rejected payload
    pub fn failure(error: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }

    /// Write the envelope as JSON with `status`, logging the outcome.
    pub fn with_status(self, status: StatusCode) -> Response {
        let code = status.as_u16();
        match &self.error {
            Some(error) if status.is_server_error() => {
                tracing::error!(status = code, %error, "response")
            }
            Some(error) => tracing::warn!(status = code, %error, "response"),
            None => tracing::info!(status = code, "response"),
        }

        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::OK)
    }
}
