//! Compact resource descriptors.
//!
//! A configured resource is a single string: a URL followed by optional
//! space-separated hints, e.g. `"https://x.test/a.js crossorigin async"`.
//! Tokens are trimmed and lowercased. The grammar is permissive: unknown
//! tokens are taken as the URL and the last one wins.

use crate::page::dom::Element;

/// How a script is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingMode {
    #[default]
    None,
    Defer,
    Async,
}

/// Cross-origin policy hint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CrossOrigin {
    #[default]
    Unset,
    /// Bare `crossorigin`.
    Enabled,
    /// `crossorigin=<value>`.
    Named(String),
}

impl CrossOrigin {
    /// Attribute value to render, `Some("")` for the bare attribute.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            CrossOrigin::Unset => None,
            CrossOrigin::Enabled => Some(""),
            CrossOrigin::Named(v) => Some(v),
        }
    }
}

/// A parsed resource descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResource {
    pub url: String,
    pub loading_mode: LoadingMode,
    pub cross_origin: CrossOrigin,
}

impl HttpResource {
    /// Parse a resource string. Never fails; a string with no URL token
    /// yields an empty `url`.
    pub fn parse(value: &str) -> Self {
        let mut res = HttpResource::default();
        for token in value.split(' ') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let lower = token.to_lowercase();

            if lower == "crossorigin" {
                res.cross_origin = CrossOrigin::Enabled;
            } else if let Some(v) = lower.strip_prefix("crossorigin=") {
                res.cross_origin = CrossOrigin::Named(v.to_string());
            } else if lower == "defer" {
                res.loading_mode = LoadingMode::Defer;
            } else if lower == "async" {
                res.loading_mode = LoadingMode::Async;
            } else {
                res.url = lower;
            }
        }
        res
    }

    /// A `<link href>` element carrying the cross-origin hint.
    pub fn to_link(&self) -> Element {
        let link = Element::new("link").attr("href", self.url.as_str());
        match self.cross_origin.attribute() {
            Some(v) => link.attr("crossorigin", v),
            None => link,
        }
    }

    /// A `<script src>` element carrying the cross-origin and loading hints.
    pub fn to_script(&self) -> Element {
        let mut script = Element::new("script").attr("src", self.url.as_str());
        if let Some(v) = self.cross_origin.attribute() {
            script = script.attr("crossorigin", v);
        }
        match self.loading_mode {
            LoadingMode::Defer => script.flag("defer"),
            LoadingMode::Async => script.flag("async"),
            LoadingMode::None => script,
        }
    }
}
