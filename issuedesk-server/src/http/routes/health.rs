//! Health check endpoint

use axum::{routing::get, Router};

/// GET /healthCheck
async fn health_check() -> &'static str {
    tracing::debug!("health check");
    "OK\n"
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/healthCheck", get(health_check))
}
