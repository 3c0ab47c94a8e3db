//! Generated and bundled PWA assets.
//!
//! # Data Flow
//! ```text
//! AppConfig (defaults applied) + ResourceResolver
//!     → app_js.rs     → /app.js               (bootstrap, env, wasm loader)
//!     → worker.rs     → /app-worker.js        (offline resource list)
//!     → manifest.rs   → /manifest.webmanifest (install metadata)
//! bundled as-is
//!     → /app.css, /wasm_exec.js
//! ```
//!
//! # Design Decisions
//! - Templates are plain substitution: auto-escaping is off and values that
//!   land in JS/JSON are JSON-encoded before rendering
//! - Same inputs produce byte-identical output

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use thiserror::Error;

pub mod app_js;
pub mod library;
pub mod manifest;
pub mod worker;

pub use app_js::app_js;
pub use library::{Library, StaticLibrary};
pub use manifest::manifest;
pub use worker::{app_worker_js, resources_to_cache};

/// Bundled stylesheet for the loader and app shell.
pub const APP_CSS: &str = include_str!("templates/app.css");

/// Client runtime loader, served as-is.
pub const WASM_EXEC_JS: &str = include_str!("templates/wasm_exec.js");

/// Default service worker template.
pub const DEFAULT_WORKER_TEMPLATE: &str = include_str!("templates/app-worker.js");

pub(crate) const APP_JS_TEMPLATE: &str = include_str!("templates/app.js");
pub(crate) const MANIFEST_TEMPLATE: &str = include_str!("templates/manifest.webmanifest");

/// Rendering a bundled or configured template failed.
#[derive(Debug, Error)]
#[error("rendering {name} failed: {source}")]
pub struct TemplateError {
    pub name: &'static str,
    #[source]
    pub source: minijinja::Error,
}

/// Render `source` with `ctx`, without escaping.
pub(crate) fn render<S: Serialize>(
    name: &'static str,
    source: &str,
    ctx: S,
) -> Result<String, TemplateError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);

    let wrap = |source: minijinja::Error| TemplateError { name, source };
    let tmpl = env.template_from_named_str(name, source).map_err(wrap)?;
    tmpl.render(ctx).map_err(wrap)
}

/// JSON encoding of a value for inclusion in a script or JSON document.
pub(crate) fn json_string<T: Serialize + ?Sized>(value: &T) -> String {
    // Serializing strings, string maps and string lists cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_no_escaping() {
        let out = render("x.js", "const a = {{ a }};\n", json!({ "a": "\"<b>\"" })).unwrap();
        assert_eq!(out, "const a = \"<b>\";\n");
    }

    #[test]
    fn test_render_error() {
        let err = render("broken.js", "{{ a ", json!({})).unwrap_err();
        assert_eq!(err.name, "broken.js");
        assert!(err.to_string().starts_with("rendering broken.js failed"));
    }

    #[test]
    fn test_bundled_templates_parse() {
        let env = Environment::new();
        for (name, source) in [
            ("app.js", APP_JS_TEMPLATE),
            ("app-worker.js", DEFAULT_WORKER_TEMPLATE),
            ("manifest.webmanifest", MANIFEST_TEMPLATE),
        ] {
            assert!(env.template_from_named_str(name, source).is_ok(), "{} failed", name);
        }
    }
}
