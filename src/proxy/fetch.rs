//! Upstream fetch for proxy resources.

use axum::http::{header, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::cache::CacheItem;

/// Errors that can occur while fetching a proxy resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or request failure (including timeout).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with something other than 200.
    #[error("upstream returned {0}")]
    Status(StatusCode),

    /// Reading the upstream body failed.
    #[error("reading body failed: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Status to answer the client with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Status(_) => StatusCode::NOT_FOUND,
            FetchError::Transport(_) | FetchError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Body(_) => "body",
        }
    }
}

/// GET `url` and package the response as a cache item stored under `path`.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    path: &str,
    timeout: Duration,
) -> Result<CacheItem, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::Transport)?;

    if response.status() != StatusCode::OK {
        return Err(FetchError::Status(response.status()));
    }

    let header_str = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header_str(header::CONTENT_TYPE).unwrap_or_default();
    let content_encoding = header_str(header::CONTENT_ENCODING).filter(|v| !v.is_empty());

    let body = response.bytes().await.map_err(FetchError::Body)?;

    Ok(CacheItem {
        path: path.to_string(),
        content_type,
        content_encoding,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = FetchError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "status");
        assert_eq!(err.to_string(), "upstream returned 503 Service Unavailable");
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = reqwest::Client::new();
        // Port 9 on localhost is not expected to accept HTTP connections.
        let url = "http://127.0.0.1:9/robots.txt";
        let err = fetch(&client, url, "/robots.txt", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
