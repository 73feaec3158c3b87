//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// What the `{slug}` segment of `/issue/{slug}` refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueRoute {
    /// `/issue/list`
    List,
    /// `/issue/new`; the new id comes from the body, not the path
    New,
    /// `/issue/{id}`
    ById(String),
}

impl IssueRoute {
    pub fn parse(slug: &str) -> Self {
        match slug {
            "list" => Self::List,
            "new" => Self::New,
            id => Self::ById(id.to_owned()),
        }
    }
}

/// Extract the slug from path and classify it
pub struct IssuePath {
    pub slug: String,
    pub route: IssueRoute,
}

impl<S> FromRequestParts<S> for IssuePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(slug): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NoRoute {
                method: parts.method.clone(),
                path: parts.uri.path().to_owned(),
            })?;

        let route = IssueRoute::parse(&slug);
        Ok(Self { slug, route })
    }
}

/// Decode a JSON request body.
///
/// The declared content type must be exactly `application/json`; parameters
/// such as `; charset=utf-8` are rejected. Checked before the body is parsed.
/// The body is the raw extractor result, so a read failure such as the size
/// limit renders as an envelope, and only on routes that read a body.
pub fn json_body<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type != "application/json" {
        return Err(ApiError::UnsupportedContentType {
            content_type: content_type.to_owned(),
        });
    }

    let body = body?;
    serde_json::from_slice(&body).map_err(ApiError::MalformedBody)
}
