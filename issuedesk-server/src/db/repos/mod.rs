//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Acquires the shared pool from the connection provider per call
//! - Parameterized statements only
//! - Errors carry the operation name as context

pub mod issues;

pub use issues::IssueRepo;
