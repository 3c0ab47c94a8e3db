//! Resource resolvers.
//!
//! # Responsibilities
//! - Map a logical path to the URL the browser should load
//! - Optionally expose a [`FileServer`] for `/web/` requests
//!
//! # Design Decisions
//! - Resolution is pure: the same input always yields the same output
//! - `LocalDir` is the only resolver that serves files itself

use std::fmt;
use std::path::PathBuf;

use super::files::FileServer;
use super::{is_remote_location, is_static_resource_path};

/// Resolves resource paths to servable URLs.
pub trait ResourceResolver: Send + Sync + fmt::Debug {
    /// Resolve a logical path (or URL) to the location to serve.
    fn resolve(&self, path: &str) -> String;

    /// The file server backing this resolver, when it serves files itself.
    fn file_server(&self) -> Option<FileServer> {
        None
    }
}

fn resolve_local(path: &str) -> String {
    if is_remote_location(path) {
        return path.to_string();
    }
    format!("/{}", path.trim_matches('/'))
}

/// Resources served from a local directory by the handler itself.
#[derive(Debug, Clone)]
pub struct LocalDir {
    files: FileServer,
}

impl LocalDir {
    /// Serve static resources from `root` (empty for the working directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            files: FileServer::new(root.into()),
        }
    }
}

impl ResourceResolver for LocalDir {
    fn resolve(&self, path: &str) -> String {
        resolve_local(path)
    }

    fn file_server(&self) -> Option<FileServer> {
        Some(self.files.clone())
    }
}

/// Static resources hosted in a remote bucket or CDN.
///
/// Only `/web/` paths are rewritten to the bucket; other paths stay local.
#[derive(Debug, Clone)]
pub struct RemoteBucket {
    root: String,
}

impl RemoteBucket {
    pub fn new(url: impl AsRef<str>) -> Self {
        let url = url.as_ref().trim_end_matches('/');
        let root = url.strip_suffix("/web").unwrap_or(url);
        Self {
            root: root.to_string(),
        }
    }
}

impl ResourceResolver for RemoteBucket {
    fn resolve(&self, path: &str) -> String {
        if is_remote_location(path) {
            return path.to_string();
        }
        let trimmed = path.trim_matches('/');
        if trimmed != "web" && !is_static_resource_path(path) {
            return resolve_local(path);
        }
        format!("{}/{}", self.root, trimmed)
    }
}

/// Every local path prefixed, for apps hosted under a sub-path.
#[derive(Debug, Clone)]
pub struct PrefixedLocation {
    prefix: String,
}

impl PrefixedLocation {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let prefix = prefix.as_ref().trim_matches('/');
        let prefix = if prefix.is_empty() || is_remote_location(prefix) {
            prefix.to_string()
        } else {
            format!("/{}", prefix)
        };
        Self { prefix }
    }
}

impl ResourceResolver for PrefixedLocation {
    fn resolve(&self, path: &str) -> String {
        if is_remote_location(path) {
            return path.to_string();
        }
        let path = path.trim_matches('/');
        match (self.prefix.is_empty(), path.is_empty()) {
            (true, _) => format!("/{}", path),
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{}", self.prefix, path),
        }
    }
}
