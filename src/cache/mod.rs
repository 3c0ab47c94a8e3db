//! In-memory caching of served payloads.
//!
//! # Data Flow
//! ```text
//! init (once)
//!     → assets generated → MemoryCache (PWA resources, fixed set)
//!
//! proxy request (miss)
//!     → upstream fetch → MemoryCache (proxy resources, config-bounded)
//!
//! any request (hit)
//!     → CacheItem → response.rs (headers + verbatim body)
//! ```
//!
//! # Design Decisions
//! - Items are immutable once stored; identity is the request path
//! - No eviction: cardinality is bounded by configuration
//! - Capacity is an allocation hint only

pub mod memory;

pub use memory::{CacheItem, MemoryCache};
