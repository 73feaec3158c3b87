//! Database error type shared by every issue store

use sqlx::error::BoxDynError;

use crate::models::ValidationError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached (open or ping failed)
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A read statement failed, returned no row, or a row failed to decode
    #[error("{op}: query failed: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: BoxDynError,
    },

    /// A write statement failed (constraint violation included)
    #[error("{op}: exec failed: {source}")]
    Exec {
        op: &'static str,
        #[source]
        source: BoxDynError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DbError {
    pub fn query(op: &'static str, source: impl Into<BoxDynError>) -> Self {
        Self::Query {
            op,
            source: source.into(),
        }
    }

    pub fn exec(op: &'static str, source: impl Into<BoxDynError>) -> Self {
        Self::Exec {
            op,
            source: source.into(),
        }
    }
}
