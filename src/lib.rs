//! Server-side host for WebAssembly progressive web apps.
//!
//! Serves the HTML page shell, the generated bootstrap script, service
//! worker and manifest, proxied static resources, and the app's static files.

pub mod assets;
pub mod cache;
pub mod config;
pub mod export;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod page;
pub mod proxy;
pub mod resources;

pub use config::schema::{AppConfig, HostConfig};
pub use http::{Handler, HttpServer};
pub use lifecycle::Shutdown;
