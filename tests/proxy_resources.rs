//! Proxy resource fetching and caching against mock upstreams.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::atomic::Ordering;
use std::time::Duration;

use pwa_host::config::AppConfig;
use pwa_host::http::Handler;
use pwa_host::proxy::ProxyResource;
use pwa_host::resources::RemoteBucket;

mod common;

fn handler(upstream: std::net::SocketAddr) -> Handler {
    let mut config = AppConfig::default();
    config.version = "v1".into();
    config.proxy_resources = vec![ProxyResource::new("/data.json", "/web/data.json")];
    Handler::new(config)
        .with_resources(RemoteBucket::new(format!("http://{}", upstream)))
        .with_client(common::client())
        .with_fetch_timeout(Duration::from_secs(5))
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_fetched_resource_is_cached() {
    let (upstream, calls) =
        common::start_programmable_backend(|| async { (200, "User-agent: *".to_string()) }).await;
    let handler = handler(upstream);

    let response = handler.handle(get("/robots.txt")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(response.headers()[header::ETAG], "\"v1\"");
    assert_eq!(body_string(response).await, "User-agent: *");

    let response = handler.handle(get("/robots.txt")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "User-agent: *");

    assert_eq!(calls.load(Ordering::SeqCst), 1, "second request served from cache");
    let cached = handler.prepare().unwrap().cached_proxy_resource("/robots.txt").unwrap();
    assert_eq!(cached.body.as_ref(), b"User-agent: *");
}

#[tokio::test]
async fn test_upstream_error_is_not_found_and_not_cached() {
    let (upstream, calls) = common::start_programmable_backend(|| async {
        (503, "Service Unavailable".to_string())
    })
    .await;
    let handler = handler(upstream);

    let response = handler.handle(get("/data.json")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = handler.handle(get("/data.json")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(calls.load(Ordering::SeqCst), 2, "failures are fetched again");
    assert!(handler.prepare().unwrap().cached_proxy_resource("/data.json").is_none());
}

#[tokio::test]
async fn test_unreachable_upstream_is_server_error() {
    let upstream = common::closed_port().await;
    let handler = handler(upstream);

    let response = handler.handle(get("/sitemap.xml")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn test_recovers_after_upstream_failure() {
    let (upstream, calls) = common::start_programmable_backend({
        let attempts = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        move || {
            let attempts = attempts.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    (500, "boom".to_string())
                } else {
                    (200, "{\"ok\":true}".to_string())
                }
            }
        }
    })
    .await;
    let handler = handler(upstream);

    assert_eq!(handler.handle(get("/data.json")).await.status(), StatusCode::NOT_FOUND);

    let response = handler.handle(get("/data.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "{\"ok\":true}");

    assert_eq!(handler.handle(get("/data.json")).await.status(), StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
