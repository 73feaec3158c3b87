//! Issue repository
//!
//! One parameterized statement per operation against the `issues` table:
//! - list: newest first, capped at 100 rows
//! - get: zero rows is an error, there is no separate not-found kind
//! - update/delete: no existence check, zero rows affected still succeeds

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use crate::db::{ConnectionProvider, DbError, IssueStore, LIST_LIMIT};
use crate::models::{Issue, IssueChanges, NewIssue};

/// Issue record from database
#[derive(Debug, Clone, FromRow)]
struct IssueRow {
    id: String,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// PostgreSQL-backed issue store
#[derive(Debug)]
pub struct IssueRepo {
    provider: ConnectionProvider,
}

impl IssueRepo {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Open the pool now instead of on the first request.
    pub async fn connect(&self) -> Result<(), DbError> {
        self.provider.acquire().await.map(|_| ())
    }
}

#[async_trait]
impl IssueStore for IssueRepo {
    async fn list(&self) -> Result<Vec<Issue>, DbError> {
        let pool = self.provider.acquire().await?;

        let rows: Vec<IssueRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, created_at
            FROM issues
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(LIST_LIMIT as i64)
        .fetch_all(&pool)
        .await
        .map_err(|e| DbError::query("issues.list", e))?;

        Ok(rows.into_iter().map(Issue::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Issue, DbError> {
        let pool = self.provider.acquire().await?;

        let row: IssueRow = sqlx::query_as(
            r#"
            SELECT id, title, description, created_at
            FROM issues
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .map_err(|e| DbError::query("issues.get", e))?;

        Ok(row.into())
    }

    async fn create(&self, issue: NewIssue) -> Result<Issue, DbError> {
        issue.validate()?;
        let pool = self.provider.acquire().await?;

        sqlx::query("INSERT INTO issues (id, title, description) VALUES ($1, $2, $3)")
            .bind(&issue.id)
            .bind(&issue.title)
            .bind(&issue.description)
            .execute(&pool)
            .await
            .map_err(|e| DbError::exec("issues.create", e))?;

        Ok(issue.into_issue())
    }

    async fn update(&self, id: &str, changes: IssueChanges) -> Result<Issue, DbError> {
        changes.validate()?;
        let pool = self.provider.acquire().await?;

        let result = sqlx::query("UPDATE issues SET title = $2, description = $3 WHERE id = $1")
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .execute(&pool)
            .await
            .map_err(|e| DbError::exec("issues.update", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "update matched no rows");
        }

        Ok(changes.into_issue(id))
    }

    async fn delete(&self, id: &str) -> Result<Issue, DbError> {
        let pool = self.provider.acquire().await?;

        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await
            .map_err(|e| DbError::exec("issues.delete", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "delete matched no rows");
        }

        Ok(Issue::tombstone(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p issuedesk-server -- --ignored

    const SCHEMA: &str = include_str!("../../../sql/issues.sql");

    async fn repo() -> (IssueRepo, PgPool) {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let provider = ConnectionProvider::new(url, 2);
        let pool = provider.acquire().await.expect("connect failed");
        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .expect("schema setup failed");
        (IssueRepo::new(provider), pool)
    }

    fn unique_id(tag: &str) -> String {
        format!("{}-{}", tag, uuid::Uuid::new_v4())
    }

    async fn count(pool: &PgPool, id: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM issues WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .expect("count failed");
        n
    }

    fn new_issue(id: &str) -> NewIssue {
        NewIssue {
            id: id.to_owned(),
            title: "Bug".into(),
            description: "Crash on save".into(),
        }
    }

    #[test]
    fn row_timestamp_is_rfc3339() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let issue = Issue::from(IssueRow {
            id: "1".into(),
            title: "t".into(),
            description: "d".into(),
            created_at,
        });
        assert_eq!(issue.created_at, "2024-05-01T12:30:00.000000Z");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let (repo, _pool) = repo().await;
        let id = unique_id("roundtrip");

        let created = repo.create(new_issue(&id)).await.expect("create failed");
        assert!(created.created_at.is_empty());

        let fetched = repo.get(&id).await.expect("get failed");
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.title, "Bug");
        assert_eq!(fetched.description, "Crash on save");
        assert!(!fetched.created_at.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_id_is_exec_error() {
        let (repo, _pool) = repo().await;
        let id = unique_id("dup");

        repo.create(new_issue(&id)).await.expect("first create failed");
        let err = repo.create(new_issue(&id)).await.unwrap_err();
        assert!(matches!(err, DbError::Exec { op: "issues.create", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn invalid_create_inserts_nothing() {
        let (repo, pool) = repo().await;
        let id = unique_id("invalid");

        let mut issue = new_issue(&id);
        issue.description.clear();
        let err = repo.create(issue).await.unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(count(&pool, &id).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_missing_is_query_error() {
        let (repo, _pool) = repo().await;
        let err = repo.get(&unique_id("missing")).await.unwrap_err();
        assert!(matches!(err, DbError::Query { op: "issues.get", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_succeeds_without_inserting() {
        let (repo, pool) = repo().await;
        let id = unique_id("ghost");

        let changes = IssueChanges {
            title: "t".into(),
            description: "d".into(),
        };
        let updated = repo.update(&id, changes).await.expect("update failed");

        assert_eq!(updated.id, id);
        assert_eq!(count(&pool, &id).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_keeps_id_and_created_at() {
        let (repo, _pool) = repo().await;
        let id = unique_id("edit");
        repo.create(new_issue(&id)).await.expect("create failed");
        let before = repo.get(&id).await.expect("get failed");

        let changes = IssueChanges {
            title: "Still a bug".into(),
            description: "Crash on load".into(),
        };
        repo.update(&id, changes).await.expect("update failed");

        let after = repo.get(&id).await.expect("get failed");
        assert_eq!(after.title, "Still a bug");
        assert_eq!(after.description, "Crash on load");
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_is_idempotent() {
        let (repo, pool) = repo().await;
        let id = unique_id("gone");
        repo.create(new_issue(&id)).await.expect("create failed");

        let first = repo.delete(&id).await.expect("first delete failed");
        assert_eq!(first, Issue::tombstone(id.as_str()));
        repo.delete(&id).await.expect("second delete failed");
        assert_eq!(count(&pool, &id).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_newest_first_and_capped() {
        let (repo, _pool) = repo().await;
        for n in 0..(LIST_LIMIT + 5) {
            repo.create(new_issue(&unique_id(&format!("bulk{n}"))))
                .await
                .expect("create failed");
        }

        let issues = repo.list().await.expect("list failed");
        assert_eq!(issues.len(), LIST_LIMIT);
        assert!(issues
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }
}
