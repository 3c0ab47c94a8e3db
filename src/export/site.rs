//! Static website generation.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::http::{Handler, InitError, PWA_RESOURCE_PATHS};

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error("invalid export path {0:?}")]
    Path(String),

    #[error("{path} answered {status}")]
    Status { path: String, status: StatusCode },

    #[error("reading response for {path} failed: {source}")]
    Body {
        path: String,
        #[source]
        source: axum::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File a page path is written to, relative to the output directory.
///
/// `/` maps to `index.html`, `/a/b` to `a/b.html`.
pub fn page_file(path: &str) -> PathBuf {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return PathBuf::from("index.html");
    }
    PathBuf::from(format!("{}.html", trimmed))
}

/// Write the PWA assets, library stylesheets and rendered `pages` into `dir`.
///
/// Configured exact routes are always exported. Returns the written files.
pub async fn generate_static_website(
    dir: &Path,
    handler: &Handler,
    pages: &[String],
) -> Result<Vec<PathBuf>, ExportError> {
    let prepared = handler.prepare()?;

    let mut written = Vec::new();
    let assets = PWA_RESOURCE_PATHS
        .iter()
        .copied()
        .chain(prepared.library_paths());
    for path in assets {
        let file = dir.join(path.trim_start_matches('/'));
        export(handler, path, &file).await?;
        written.push(file);
    }

    let pages: BTreeSet<&str> = prepared
        .settings()
        .routes
        .iter()
        .chain(pages)
        .map(String::as_str)
        .collect();
    for path in pages {
        if !path.starts_with('/') || path.split('/').any(|s| s == "..") {
            return Err(ExportError::Path(path.to_string()));
        }
        let file = dir.join(page_file(path));
        export(handler, path, &file).await?;
        written.push(file);
    }

    tracing::info!(dir = ?dir, files = written.len(), "Static website generated");
    Ok(written)
}

async fn export(handler: &Handler, path: &str, file: &Path) -> Result<(), ExportError> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .map_err(|_| ExportError::Path(path.to_string()))?;

    let response = handler.handle(request).await;
    if response.status() != StatusCode::OK {
        return Err(ExportError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|source| ExportError::Body {
            path: path.to_string(),
            source,
        })?;

    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(file, &body)
        .await
        .map_err(|source| ExportError::Io {
            path: file.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path, file = ?file, bytes = body.len(), "Exported");
    Ok(())
}
