//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::proxy::ProxyResource;
use crate::resources::{LocalDir, PrefixedLocation, RemoteBucket, ResourceResolver};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener settings.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// The web app served by the handler.
    pub app: AppConfig,

    /// CSS libraries mounted next to the app.
    pub libraries: Vec<LibraryConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Upstream fetch timeout for proxy resources in seconds.
    pub proxy_fetch_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            proxy_fetch_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human readable text.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// App icon set. Paths are relative to the root unless they are URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Icon {
    /// 192x192 PNG.
    pub default: String,

    /// 512x512 PNG.
    pub large: String,

    /// Scalable vector icon.
    pub svg: String,

    /// 192x192 adaptive PNG. Falls back to `default`.
    pub maskable: String,
}

/// Where static resources live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourcesConfig {
    /// Served by this process from a local directory.
    Local {
        #[serde(default)]
        root: String,
    },
    /// Hosted in a remote bucket or CDN.
    RemoteBucket { url: String },
    /// Hosted under a path prefix.
    Prefixed { prefix: String },
}

impl ResourcesConfig {
    /// Build the resolver described by this configuration.
    pub fn build(&self) -> Arc<dyn ResourceResolver> {
        match self {
            ResourcesConfig::Local { root } => Arc::new(LocalDir::new(root.as_str())),
            ResourcesConfig::RemoteBucket { url } => Arc::new(RemoteBucket::new(url)),
            ResourcesConfig::Prefixed { prefix } => Arc::new(PrefixedLocation::new(prefix)),
        }
    }
}

/// Web app configuration.
///
/// Resource strings (icons, styles, fonts, scripts, cacheable resources,
/// preconnect) accept attribute hints after a space, e.g.
/// `"https://x.test/a.js crossorigin async"`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Display name, used where space permits.
    pub name: String,

    /// Abbreviated name for limited display areas.
    pub short_name: String,

    pub icon: Icon,

    /// Page background before stylesheets load. Defaults to "#2d2c2c".
    pub background_color: String,

    /// OS-level theme color. Defaults to "#2d2c2c".
    pub theme_color: String,

    /// Loading text, `{progress}` replaced by the load percentage.
    pub loading_label: String,

    /// Page language. Defaults to "en".
    pub lang: String,

    pub title: String,
    pub description: String,

    /// Domain used to build absolute OpenGraph URLs.
    pub domain: String,

    pub author: String,
    pub keywords: Vec<String>,

    /// Default image for social previews.
    pub image: String,

    pub styles: Vec<String>,

    /// Fonts to preload.
    pub fonts: Vec<String>,

    pub scripts: Vec<String>,

    /// Extra resources the service worker caches for offline use.
    pub cacheable_resources: Vec<String>,

    /// Extra markup appended to `<head>`.
    pub raw_headers: Vec<String>,

    /// Variables exposed to the client bootstrap script.
    pub env: BTreeMap<String, String>,

    /// Also write `env` into the process environment during init.
    pub propagate_env: bool,

    /// URLs opened inside the app instead of a new tab.
    pub internal_urls: Vec<String>,

    /// Origins to preconnect to.
    pub preconnect: Vec<String>,

    /// Public paths backed by static resources.
    pub proxy_resources: Vec<ProxyResource>,

    /// Static resources location. Defaults to the working directory.
    pub resources: Option<ResourcesConfig>,

    /// Build version. Generated per process start when empty, which is only
    /// suitable for local development.
    pub version: String,

    /// Byte length of the WASM binary, for load progress.
    pub wasm_content_length: String,

    /// Header carrying the WASM binary length. Defaults to "Content-Length".
    pub wasm_content_length_header: String,

    /// Replacement for the bundled service worker template.
    pub service_worker_template: String,

    /// Page paths rendered by the handler.
    pub routes: Vec<String>,

    /// Regular expressions matching additional page paths.
    pub route_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_name: String::new(),
            icon: Icon::default(),
            background_color: String::new(),
            theme_color: String::new(),
            loading_label: String::new(),
            lang: String::new(),
            title: String::new(),
            description: String::new(),
            domain: String::new(),
            author: String::new(),
            keywords: Vec::new(),
            image: String::new(),
            styles: Vec::new(),
            fonts: Vec::new(),
            scripts: Vec::new(),
            cacheable_resources: Vec::new(),
            raw_headers: Vec::new(),
            env: BTreeMap::new(),
            propagate_env: false,
            internal_urls: Vec::new(),
            preconnect: Vec::new(),
            proxy_resources: Vec::new(),
            resources: None,
            version: String::new(),
            wasm_content_length: String::new(),
            wasm_content_length_header: String::new(),
            service_worker_template: String::new(),
            routes: vec!["/".to_string()],
            route_patterns: Vec::new(),
        }
    }
}

/// A stylesheet library read from disk at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Mount path, must start with `/`.
    pub path: String,

    /// CSS file to serve under `path`.
    pub css_file: String,
}
