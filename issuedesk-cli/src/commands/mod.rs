//! Command implementations for the issuedesk CLI

pub mod serve;

pub use serve::run_serve;
