//! Issue records and request payloads

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// An issue as returned to callers.
///
/// `created_at` is an RFC 3339 timestamp for rows read from storage and an
/// empty string on records echoed back by write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl Issue {
    /// Record holding only an id, as returned by delete
    pub fn tombstone(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            created_at: String::new(),
        }
    }
}

/// Body of `POST /issue/new`.
///
/// Absent fields decode as empty strings so they surface as validation
/// failures rather than malformed bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewIssue {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl NewIssue {
    /// Check that id, title and description are all non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        if self.id.is_empty() {
            fields.push("id");
        }
        if self.title.is_empty() {
            fields.push("title");
        }
        if self.description.is_empty() {
            fields.push("description");
        }
        reject_if_missing(fields, self)
    }

    /// Echo of the inserted row, without a created_at
    pub fn into_issue(self) -> Issue {
        Issue {
            id: self.id,
            title: self.title,
            description: self.description,
            created_at: String::new(),
        }
    }
}

/// Body of `POST /issue/{id}`. Only title and description are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueChanges {
    pub title: String,
    pub description: String,
}

impl IssueChanges {
    /// Check that title and description are both non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        if self.title.is_empty() {
            fields.push("title");
        }
        if self.description.is_empty() {
            fields.push("description");
        }
        reject_if_missing(fields, self)
    }

    pub fn into_issue(self, id: impl Into<String>) -> Issue {
        Issue {
            id: id.into(),
            title: self.title,
            description: self.description,
            created_at: String::new(),
        }
    }
}

fn reject_if_missing<T: Serialize>(
    fields: Vec<&'static str>,
    payload: &T,
) -> Result<(), ValidationError> {
    if fields.is_empty() {
        return Ok(());
    }
    Err(ValidationError::MissingFields {
        fields,
        payload: serde_json::to_value(payload).unwrap_or_default(),
    })
}
