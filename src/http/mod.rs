//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing)
//!     → handler.rs (ETag check, version prefix, dispatch)
//!         → static files   (resources::FileServer)
//!         → PWA assets     (cache::MemoryCache built at init)
//!         → proxy resources (proxy::fetch, cached on success)
//!         → library styles
//!         → page render    (page::render_page)
//!     → response.rs (Cache-Control, ETag, content headers)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{Handler, InitError, Prepared, PWA_RESOURCE_PATHS};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
