//! In-memory issue store
//!
//! Mirrors [`IssueRepo`](super::IssueRepo) semantics without a database,
//! for router tests and local runs. Issues are kept in insertion order,
//! which is also `created_at` order.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;

use super::{DbError, IssueStore, LIST_LIMIT};
use crate::models::{Issue, IssueChanges, NewIssue};

/// Unique constraint violation on `issues.id`
#[derive(Debug, thiserror::Error)]
#[error("duplicate key value violates unique constraint: id '{0}'")]
pub struct DuplicateId(pub String);

/// Issue store backed by a vector behind an async lock
#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<Vec<Issue>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored issues
    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn list(&self) -> Result<Vec<Issue>, DbError> {
        let issues = self.issues.read().await;
        Ok(issues.iter().rev().take(LIST_LIMIT).cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Issue, DbError> {
        let issues = self.issues.read().await;
        issues
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(|| DbError::query("issues.get", sqlx::Error::RowNotFound))
    }

    async fn create(&self, issue: NewIssue) -> Result<Issue, DbError> {
        issue.validate()?;

        let mut issues = self.issues.write().await;
        if issues.iter().any(|existing| existing.id == issue.id) {
            return Err(DbError::exec("issues.create", DuplicateId(issue.id)));
        }

        let echo = issue.into_issue();
        issues.push(Issue {
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            ..echo.clone()
        });

        Ok(echo)
    }

    async fn update(&self, id: &str, changes: IssueChanges) -> Result<Issue, DbError> {
        changes.validate()?;

        let mut issues = self.issues.write().await;
        match issues.iter_mut().find(|issue| issue.id == id) {
            Some(issue) => {
                issue.title.clone_from(&changes.title);
                issue.description.clone_from(&changes.description);
            }
            None => tracing::debug!(id, "update matched no rows"),
        }

        Ok(changes.into_issue(id))
    }

    async fn delete(&self, id: &str) -> Result<Issue, DbError> {
        let mut issues = self.issues.write().await;
        let before = issues.len();
        issues.retain(|issue| issue.id != id);
        if issues.len() == before {
            tracing::debug!(id, "delete matched no rows");
        }

        Ok(Issue::tombstone(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_issue(id: &str) -> NewIssue {
        NewIssue {
            id: id.to_owned(),
            title: format!("title {id}"),
            description: format!("description {id}"),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryIssueStore::new();

        let created = store.create(new_issue("42")).await.unwrap();
        assert_eq!(created.id, "42");
        assert!(created.created_at.is_empty());

        let fetched = store.get("42").await.unwrap();
        assert_eq!(fetched.title, "title 42");
        assert_eq!(fetched.description, "description 42");
        assert!(!fetched.created_at.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = MemoryIssueStore::new();
        store.create(new_issue("1")).await.unwrap();

        let err = store.create(new_issue("1")).await.unwrap_err();
        assert!(matches!(err, DbError::Exec { op: "issues.create", .. }));
        assert!(err.to_string().contains("duplicate key"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_create_never_stores() {
        let store = MemoryIssueStore::new();
        let mut issue = new_issue("1");
        issue.title.clear();

        let err = store.create(issue).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn missing_get_is_query_error() {
        let store = MemoryIssueStore::new();
        let err = store.get("nope").await.unwrap_err();
        assert!(matches!(err, DbError::Query { op: "issues.get", .. }));
    }

    #[tokio::test]
    async fn update_missing_is_silent() {
        let store = MemoryIssueStore::new();
        let changes = IssueChanges {
            title: "t".into(),
            description: "d".into(),
        };

        let updated = store.update("ghost", changes).await.unwrap();
        assert_eq!(updated.id, "ghost");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let store = MemoryIssueStore::new();
        store.create(new_issue("1")).await.unwrap();
        let before = store.get("1").await.unwrap();

        let changes = IssueChanges {
            title: "new title".into(),
            description: "new description".into(),
        };
        store.update("1", changes).await.unwrap();

        let after = store.get("1").await.unwrap();
        assert_eq!(after.title, "new title");
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn delete_twice_is_fine() {
        let store = MemoryIssueStore::new();
        store.create(new_issue("1")).await.unwrap();

        assert_eq!(store.delete("1").await.unwrap(), Issue::tombstone("1"));
        assert_eq!(store.delete("1").await.unwrap(), Issue::tombstone("1"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_capped() {
        let store = MemoryIssueStore::new();
        for n in 0..(LIST_LIMIT + 20) {
            store.create(new_issue(&n.to_string())).await.unwrap();
        }

        let issues = store.list().await.unwrap();
        assert_eq!(issues.len(), LIST_LIMIT);
        assert_eq!(issues[0].id, (LIST_LIMIT + 19).to_string());
        assert!(issues
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn empty_list_is_ok() {
        let store = MemoryIssueStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }
}
