//! Proxy resources.
//!
//! # Data Flow
//! ```text
//! configured [{ path, resource_path }]
//!     → table.rs (reserved-path exclusion, prefix checks, defaults)
//!     → ProxyTable (built once at init)
//!
//! request for a table path
//!     → proxy cache hit → serve
//!     → miss → fetch.rs (upstream GET) → proxy cache → serve
//! ```
//!
//! # Design Decisions
//! - Explicit configuration always wins over the implicit defaults
//! - Upstream non-200 maps to 404, never to the upstream status
//! - No request coalescing: concurrent misses fetch independently and the
//!   last write wins

pub mod fetch;
pub mod table;

pub use fetch::{fetch, FetchError};
pub use table::{ProxyResource, ProxyTable, RESERVED_PATHS};
