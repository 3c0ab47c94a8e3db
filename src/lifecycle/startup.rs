//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a prepared [`Handler`]
//! - Bind the listener and run the server until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last, once the handler is ready

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_libraries, ConfigError, HostConfig};
use crate::http::{Handler, HttpServer, InitError};
use crate::lifecycle::{shutdown_signal, Shutdown};
use crate::observability::metrics;

/// Errors that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("handler initialization failed: {0}")]
    Init(#[from] InitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build and prepare the handler described by `config`.
///
/// Library stylesheets are read relative to `base_dir`.
pub fn build_handler(config: &HostConfig, base_dir: &Path) -> Result<Handler, StartupError> {
    let mut handler = Handler::new(config.app.clone())
        .with_fetch_timeout(Duration::from_secs(config.timeouts.proxy_fetch_secs));
    for library in load_libraries(&config.libraries, base_dir)? {
        handler = handler.with_library(library);
    }

    let prepared = handler.prepare()?;
    tracing::info!(
        version = %prepared.version(),
        proxy_resources = prepared.proxy_resources().len(),
        libraries = prepared.library_paths().len(),
        "Handler ready"
    );
    Ok(handler)
}

/// Serve `handler` until SIGINT/SIGTERM.
pub async fn serve(config: HostConfig, handler: Handler) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(handler));
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    shutdown_signal().await;
    shutdown.trigger();

    match server_task.await {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, LibraryConfig};

    #[test]
    fn test_build_handler_with_library() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("theme.css"), ".theme {}").unwrap();

        let mut config = parse_config("[app]\nversion = \"1.0.0\"\n").unwrap();
        config.libraries = vec![LibraryConfig {
            path: "/theme.css".into(),
            css_file: "theme.css".into(),
        }];

        let handler = build_handler(&config, dir.path()).unwrap();
        let prepared = handler.prepare().unwrap();
        assert_eq!(prepared.version(), "1.0.0");
        assert_eq!(prepared.library_paths(), vec!["/theme.css"]);
    }

    #[test]
    fn test_build_handler_missing_library() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HostConfig::default();
        config.libraries = vec![LibraryConfig {
            path: "/theme.css".into(),
            css_file: "missing.css".into(),
        }];

        let err = build_handler(&config, dir.path()).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io { .. })));
    }
}
