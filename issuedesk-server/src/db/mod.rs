//! Database layer - connection provider and issue stores
//!
//! # Design Principles
//!
//! - One pool per process, created once and injected - no global handle
//! - One statement per operation, no transactions
//! - Rely on DB constraints for uniqueness - no check-then-insert
//! - Update/delete do not check existence; zero rows affected is success

pub mod error;
pub mod memory;
pub mod pool;
pub mod repos;

use async_trait::async_trait;

use crate::models::{Issue, IssueChanges, NewIssue};

pub use error::DbError;
pub use memory::MemoryIssueStore;
pub use pool::{ConnectionProvider, DEFAULT_MAX_CONNECTIONS};
pub use repos::IssueRepo;

/// Maximum number of rows returned by [`IssueStore::list`]
pub const LIST_LIMIT: usize = 100;

/// Persistence operations for issues.
///
/// Implementations validate write payloads before touching storage and wrap
/// every storage failure in a [`DbError`] naming the operation.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Most recent issues first, at most [`LIST_LIMIT`]
    async fn list(&self) -> Result<Vec<Issue>, DbError>;

    /// A single issue; a missing id is a query error
    async fn get(&self, id: &str) -> Result<Issue, DbError>;

    /// Insert a new issue, echoing it back without `created_at`
    async fn create(&self, issue: NewIssue) -> Result<Issue, DbError>;

    /// Overwrite title and description of `id`
    async fn update(&self, id: &str, changes: IssueChanges) -> Result<Issue, DbError>;

    /// Remove `id`; deleting a missing id succeeds
    async fn delete(&self, id: &str) -> Result<Issue, DbError>;
}
