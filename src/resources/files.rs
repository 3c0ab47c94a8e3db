//! Static file serving from a local directory.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Serves files below a root directory, request path mapped onto it.
#[derive(Debug, Clone)]
pub struct FileServer {
    root: PathBuf,
    service: ServeDir,
}

impl FileServer {
    /// Serve files from `root`; an empty root is the working directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = match root.as_ref() {
            p if p.as_os_str().is_empty() => PathBuf::from("."),
            p => p.to_path_buf(),
        };
        Self {
            service: ServeDir::new(&root),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve the file addressed by the request path.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        match self.service.clone().oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(e) => {
                tracing::error!(root = ?self.root, error = %e, "Serving static file failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("web")).unwrap();
        std::fs::write(dir.path().join("web/hello.txt"), "hello").unwrap();

        let files = FileServer::new(dir.path());
        let request = Request::builder()
            .uri("/web/hello.txt")
            .body(Body::empty())
            .unwrap();
        let response = files.serve(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileServer::new(dir.path());
        let request = Request::builder()
            .uri("/web/missing.txt")
            .body(Body::empty())
            .unwrap();
        assert_eq!(files.serve(request).await.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_root_is_working_dir() {
        assert_eq!(FileServer::new("").root(), Path::new("."));
    }
}
