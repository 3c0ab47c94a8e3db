//! Stylesheet libraries mounted next to the app.

use std::fmt;

/// A library contributing a stylesheet served under its own path.
pub trait Library: Send + Sync + fmt::Debug {
    /// Mount path and CSS text.
    fn styles(&self) -> (String, String);
}

/// A library with a fixed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLibrary {
    path: String,
    css: String,
}

impl StaticLibrary {
    pub fn new(path: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            css: css.into(),
        }
    }
}

impl Library for StaticLibrary {
    fn styles(&self) -> (String, String) {
        (self.path.clone(), self.css.clone())
    }
}
