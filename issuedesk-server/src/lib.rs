//! issuedesk-server: JSON issue API over PostgreSQL
//!
//! One resource, five operations, one envelope:
//!
//! - `GET /issue/list`, `POST /issue/new`
//! - `GET | POST | DELETE /issue/{id}`
//!
//! Every response body is `{success, data, error}`.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{ConnectionProvider, DbError, IssueRepo, IssueStore, MemoryIssueStore};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use models::{Issue, IssueChanges, NewIssue};
pub use state::AppState;
