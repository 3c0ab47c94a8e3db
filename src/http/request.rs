//! Request inspection and rewriting.
//!
//! # Responsibilities
//! - Read the request id set by the request-id layer
//! - Work out the public scheme and host for self-referential fetches
//! - Rewrite the path of a request before delegating it
//!
//! # Design Decisions
//! - The query string survives path rewrites
//! - `X-Forwarded-Proto` is trusted for the scheme: the host usually sits
//!   behind a TLS terminating proxy

use axum::{
    body::Body,
    http::{header, uri::PathAndQuery, Request, Uri},
};

/// Request ID header name.
pub const X_REQUEST_ID: &str = "x-request-id";

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Request ID assigned by the request-id layer, or "unknown".
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Scheme the client used to reach us.
pub fn request_scheme<B>(request: &Request<B>) -> &str {
    if let Some(scheme) = request.uri().scheme_str() {
        return scheme;
    }
    request
        .headers()
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| *v == "https" || *v == "http")
        .unwrap_or("http")
}

/// Host (and port) the client addressed.
pub fn request_host<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
}

/// Owned request facts needed after the body is gone or across an await.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub request_id: String,
    pub scheme: String,
    pub host: Option<String>,
}

impl RequestOrigin {
    pub fn of<B>(request: &Request<B>) -> Self {
        Self {
            request_id: request_id(request).to_string(),
            scheme: request_scheme(request).to_string(),
            host: request_host(request).map(str::to_string),
        }
    }

    /// `scheme://host` followed by `path`, when the host is known.
    pub fn url(&self, path: &str) -> Option<String> {
        self.host
            .as_ref()
            .map(|host| format!("{}://{}{}", self.scheme, host, path))
    }
}

/// Replace the request path, keeping the query string.
pub fn with_path(request: Request<Body>, path: &str) -> Result<Request<Body>, axum::http::Error> {
    let (mut parts, body) = request.into_parts();
    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    parts.uri = Uri::builder()
        .path_and_query(PathAndQuery::try_from(path_and_query)?)
        .build()?;
    Ok(Request::from_parts(parts, body))
}
