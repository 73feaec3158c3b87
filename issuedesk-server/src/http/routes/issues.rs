//! Issue endpoints
//!
//! A single route, `/issue/{slug}`, accepts every method. The slug is
//! classified into an [`IssueRoute`] and dispatched on `(route, method)`:
//!
//! | Route      | GET  | POST   | DELETE |
//! |------------|------|--------|--------|
//! | `list`     | list | 405    | 405    |
//! | `new`      | 405  | create | 405    |
//! | `{id}`     | get  | update | delete |
//!
//! Anything else is 405 and never reaches the store.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;

use crate::http::envelope::{ApiResult, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{json_body, IssuePath, IssueRoute};
use crate::models::{Issue, IssueChanges, NewIssue};
use crate::state::AppState;

/// `/issue/{slug}` - dispatch on route and method
async fn route_issue(
    State(state): State<AppState>,
    method: Method,
    IssuePath { slug, route }: IssuePath,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    tracing::info!(%method, %slug, "issue request");

    match (route, method.as_str()) {
        (IssueRoute::List, "GET") => list_issues(&state).await.into_response(),
        (IssueRoute::New, "POST") => create_issue(&state, &headers, body).await.into_response(),
        (IssueRoute::ById(id), "GET") => get_issue(&state, &id).await.into_response(),
        (IssueRoute::ById(id), "POST") => {
            update_issue(&state, &id, &headers, body).await.into_response()
        }
        (IssueRoute::ById(id), "DELETE") => delete_issue(&state, &id).await.into_response(),
        (IssueRoute::List | IssueRoute::New | IssueRoute::ById(_), _) => {
            ApiError::MethodNotAllowed {
                method: method.clone(),
                slug,
            }
            .into_response()
        }
    }
}

/// GET /issue/list - newest issues first
async fn list_issues(state: &AppState) -> ApiResult<Vec<Issue>> {
    let issues = state.store().list().await?;
    Ok(Envelope::success(issues))
}

/// POST /issue/new - create from `{id, title, description}`
async fn create_issue(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Issue> {
    let issue: NewIssue = json_body(headers, body)?;
    let created = state.store().create(issue).await?;
    Ok(Envelope::success(created))
}

/// GET /issue/{id}
async fn get_issue(state: &AppState, id: &str) -> ApiResult<Issue> {
    let issue = state.store().get(id).await?;
    Ok(Envelope::success(issue))
}

/// POST /issue/{id} - replace title and description
async fn update_issue(
    state: &AppState,
    id: &str,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Issue> {
    let changes: IssueChanges = json_body(headers, body)?;
    let updated = state.store().update(id, changes).await?;
    Ok(Envelope::success(updated))
}

/// DELETE /issue/{id}
async fn delete_issue(state: &AppState, id: &str) -> ApiResult<Issue> {
    let deleted = state.store().delete(id).await?;
    Ok(Envelope::success(deleted))
}

/// Issue routes
pub fn router() -> Router<AppState> {
    Router::new().route("/issue/{slug}", any(route_issue))
}
