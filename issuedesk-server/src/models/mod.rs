//! Domain models
//!
//! Request payloads validate themselves before anything reaches storage.
//! Invalid input returns ValidationError, not panic.

pub mod issue;
pub mod validation;

pub use issue::{Issue, IssueChanges, NewIssue};
pub use validation::ValidationError;
