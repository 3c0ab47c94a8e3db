//! Static website export.
//!
//! # Data Flow
//! ```text
//! Handler (prepared)
//!     → PWA assets, library stylesheets, pages
//!     → requested through Handler::handle, like a browser would
//!     → written under the output directory
//! ```
//!
//! # Design Decisions
//! - Every file goes through the same dispatch as live traffic, so an export
//!   matches what the server would answer
//! - Static resources under `/web/` are not copied; they already live on disk

pub mod site;

pub use site::{generate_static_website, page_file, ExportError};
