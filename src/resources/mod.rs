//! Static resource location.
//!
//! # Data Flow
//! ```text
//! logical path ("/web/app.wasm", "/app.js", "https://cdn/x.css")
//!     → resolver.rs (LocalDir | RemoteBucket | PrefixedLocation)
//!     → servable URL or path
//!
//! "/web/..." request, resolver serves files
//!     → files.rs (FileServer over the resolver root)
//!
//! configured resource string ("https://x/a.js crossorigin async")
//!     → http_resource.rs (URL + attribute hints)
//! ```
//!
//! # Design Decisions
//! - File serving is an explicit capability of the resolver, decided when the
//!   resolver is built rather than probed per request
//! - Remote URLs are never rewritten

pub mod files;
pub mod http_resource;
pub mod resolver;

pub use files::FileServer;
pub use http_resource::{CrossOrigin, HttpResource, LoadingMode};
pub use resolver::{LocalDir, PrefixedLocation, RemoteBucket, ResourceResolver};

/// Returns true for absolute http(s) URLs.
pub fn is_remote_location(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}

/// Returns true for paths under the static resources directory.
pub fn is_static_resource_path(path: &str) -> bool {
    path.starts_with("/web/") || path.starts_with("web/")
}
