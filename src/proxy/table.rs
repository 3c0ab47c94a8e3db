//! Proxy resource table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Paths owned by the handler itself; a proxy entry cannot shadow them.
pub const RESERVED_PATHS: &[&str] = &[
    "/wasm_exec.js",
    "/goapp.js",
    "/app.js",
    "/app-worker.js",
    "/manifest.json",
    "/manifest.webmanifest",
    "/app.css",
    "/app.wasm",
    "/goapp.wasm",
    "/",
];

const DEFAULT_RESOURCES: &[(&str, &str)] = &[
    ("/robots.txt", "/web/robots.txt"),
    ("/sitemap.xml", "/web/sitemap.xml"),
    ("/ads.txt", "/web/ads.txt"),
];

/// A public path backed by a static resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyResource {
    /// Public path, e.g. `/robots.txt`.
    pub path: String,

    /// Static resource path, must start with `/web/`.
    pub resource_path: String,
}

impl ProxyResource {
    pub fn new(path: impl Into<String>, resource_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            resource_path: resource_path.into(),
        }
    }
}

/// Public path → proxy resource mapping.
#[derive(Debug, Clone, Default)]
pub struct ProxyTable {
    entries: HashMap<String, ProxyResource>,
}

impl ProxyTable {
    /// Build the table from configured entries.
    ///
    /// Entries shadowing a reserved path, with a public path not starting
    /// with `/`, or a resource path outside `/web/` are dropped. The
    /// robots/sitemap/ads defaults are added when not configured.
    pub fn build(configured: &[ProxyResource]) -> Self {
        let mut entries = HashMap::with_capacity(configured.len() + DEFAULT_RESOURCES.len());

        for r in configured {
            if RESERVED_PATHS.contains(&r.path.as_str()) {
                tracing::debug!(
                    path = %r.path,
                    "Dropping proxy resource shadowing a reserved path"
                );
                continue;
            }
            if !r.path.starts_with('/') || !r.resource_path.starts_with("/web/") {
                tracing::debug!(
                    path = %r.path,
                    resource_path = %r.resource_path,
                    "Dropping malformed proxy resource"
                );
                continue;
            }
            entries.insert(r.path.clone(), r.clone());
        }

        for (path, resource_path) in DEFAULT_RESOURCES {
            entries
                .entry(path.to_string())
                .or_insert_with(|| ProxyResource::new(*path, *resource_path));
        }

        Self { entries }
    }

    pub fn get(&self, path: &str) -> Option<&ProxyResource> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Public paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_injected() {
        let table = ProxyTable::build(&[]);
        assert_eq!(table.paths(), vec!["/ads.txt", "/robots.txt", "/sitemap.xml"]);
        assert_eq!(table.get("/robots.txt").unwrap().resource_path, "/web/robots.txt");
        assert_eq!(table.get("/sitemap.xml").unwrap().resource_path, "/web/sitemap.xml");
        assert_eq!(table.get("/ads.txt").unwrap().resource_path, "/web/ads.txt");
    }

    #[test]
    fn test_explicit_entry_wins() {
        let table = ProxyTable::build(&[ProxyResource::new("/robots.txt", "/web/seo/robots.txt")]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("/robots.txt").unwrap().resource_path, "/web/seo/robots.txt");
    }

    #[test]
    fn test_reserved_paths_dropped() {
        let configured: Vec<_> = RESERVED_PATHS
            .iter()
            .map(|p| ProxyResource::new(*p, "/web/evil.js"))
            .collect();
        let table = ProxyTable::build(&configured);
        assert_eq!(table.len(), 3);
        assert!(table.get("/app.js").is_none());
        assert!(table.get("/").is_none());
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let table = ProxyTable::build(&[
            ProxyResource::new("humans.txt", "/web/humans.txt"),
            ProxyResource::new("/humans.txt", "/static/humans.txt"),
            ProxyResource::new("/.well-known/security.txt", "/web/security.txt"),
        ]);
        assert_eq!(table.len(), 4);
        assert!(table.get("humans.txt").is_none());
        assert!(table.get("/humans.txt").is_none());
        assert_eq!(
            table.get("/.well-known/security.txt").unwrap().resource_path,
            "/web/security.txt"
        );
    }
}
