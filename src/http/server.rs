//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router around the [`Handler`]
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and drain on shutdown

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HostConfig;
use crate::http::handler::Handler;
use crate::http::request::X_REQUEST_ID;

/// HTTP server for the PWA handler.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving every path through `handler`.
    pub fn new(config: HostConfig, handler: Arc<Handler>) -> Self {
        let router = Self::build_router(&config, handler);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &HostConfig, handler: Arc<Handler>) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new().fallback(serve).with_state(handler).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn serve(State(handler): State<Arc<Handler>>, request: Request<Body>) -> Response {
    handler.handle(request).await
}
