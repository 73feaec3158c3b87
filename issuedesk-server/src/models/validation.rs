//! Validation error types

use std::fmt;

use serde_json::Value;

/// Validation error for issue payloads
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// One or more required fields were empty or absent.
    ///
    /// `payload` is the rejected request body, echoed back to the caller.
    MissingFields {
        fields: Vec<&'static str>,
        payload: Value,
    },
}

impl ValidationError {
    /// The offending payload, if this error carries one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::MissingFields { payload, .. } => Some(payload),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { fields, .. } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}
