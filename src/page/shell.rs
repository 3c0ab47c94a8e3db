//! Document shell strategy.

use std::fmt;

use super::dom::Element;
use super::Page;

/// Provides the `<html>` and `<body>` elements the rendered head and loader
/// are attached to.
pub trait DocumentShell: Send + Sync + fmt::Debug {
    fn html(&self, _page: &Page) -> Element {
        Element::new("html")
    }

    fn body(&self, _page: &Page) -> Element {
        Element::new("body")
    }
}

/// Bare `<html>` and `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShell;

impl DocumentShell for DefaultShell {}
