//! Response construction.
//!
//! # Responsibilities
//! - Serve cached items verbatim with their content metadata
//! - Build CSS/HTML/status-only responses
//! - Stamp the whole-site caching headers
//!
//! # Design Decisions
//! - Bodies are `Bytes` handed over without copying
//! - `Content-Encoding` only appears when the cached item carries one

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::cache::CacheItem;

fn with_body(body: Bytes, content_type: &str) -> Response {
    let len = body.len();
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    if !content_type.is_empty() {
        if let Ok(v) = HeaderValue::from_str(content_type) {
            headers.insert(header::CONTENT_TYPE, v);
        }
    }
    response
}

/// 200 with the item's payload and content headers.
pub fn cached_item(item: &CacheItem) -> Response {
    let mut response = with_body(item.body.clone(), &item.content_type);
    if let Some(encoding) = item.content_encoding.as_deref() {
        if let Ok(v) = HeaderValue::from_str(encoding) {
            response.headers_mut().insert(header::CONTENT_ENCODING, v);
        }
    }
    response
}

pub fn css(body: Bytes) -> Response {
    with_body(body, "text/css")
}

pub fn html(body: String) -> Response {
    with_body(Bytes::from(body), "text/html")
}

/// Empty response with `status`.
pub fn status(status: StatusCode) -> Response {
    status.into_response()
}

/// Headers present on every handler response.
pub fn stamp(response: &mut Response, etag: &HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::ETAG, etag.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_item_headers() {
        let mut item = CacheItem::new("/robots.txt", "text/plain", "User-agent: *");
        item.content_encoding = Some("identity".into());
        let response = cached_item(&item);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "13");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "identity");
    }

    #[test]
    fn test_no_encoding_header() {
        let response = cached_item(&CacheItem::new("/a", "", "x"));
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_stamp() {
        let mut response = status(StatusCode::NOT_FOUND);
        stamp(&mut response, &HeaderValue::from_static("\"v1\""));
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        assert_eq!(response.headers()[header::ETAG], "\"v1\"");
    }
}
