//! HTTP server layer
//!
//! Axum server with:
//! - `/issue/{slug}` dispatch on route and method
//! - Uniform JSON envelope for every response
//! - Request tracing
//! - Graceful shutdown

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::{ApiResult, Envelope};
pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
