//! Server-side page rendering.
//!
//! # Data Flow
//! ```text
//! GET <page path>
//!     → routes.rs (is the path an app route?)
//!     → Page (metadata from AppConfig + request URL)
//!     → render.rs (head/body tree through the DocumentShell)
//!     → dom.rs (HTML encoding)
//! ```
//!
//! # Design Decisions
//! - The render pass only produces the document shell and SEO metadata; the
//!   client takes over once the WASM binary loads
//! - The shell is a strategy object so embedders can decorate `<html>` and
//!   `<body>` without touching the head

pub mod dom;
pub mod render;
pub mod routes;
pub mod shell;

use std::collections::BTreeMap;

pub use dom::{encode_document, Element, Node};
pub use render::render_page;
pub use routes::Routes;
pub use shell::{DefaultShell, DocumentShell};

/// Metadata of the page being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub lang: String,
    pub description: String,
    pub author: String,
    pub keywords: Vec<String>,
    /// Loader text, progress already substituted.
    pub loading_label: String,
    pub image: String,
    /// Request path and query.
    pub url: String,
}

impl Page {
    /// Keywords joined for the `keywords` meta tag.
    pub fn keywords_content(&self) -> String {
        self.keywords.join(", ")
    }

    /// Path component of the page URL.
    pub fn path(&self) -> &str {
        self.url.split(['?', '#']).next().unwrap_or("/")
    }

    /// Twitter card metadata, keyed by meta name.
    pub fn twitter_card(&self) -> BTreeMap<&'static str, String> {
        let mut card = BTreeMap::new();
        card.insert("twitter:card", "summary_large_image".to_string());
        card.insert("twitter:title", self.title.clone());
        card.insert("twitter:description", self.description.clone());
        card.insert("twitter:image", self.image.clone());
        card
    }
}
