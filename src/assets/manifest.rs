//! `/manifest.webmanifest` generation.

use serde::Serialize;

use super::{json_string, render, TemplateError, MANIFEST_TEMPLATE};
use crate::config::AppConfig;
use crate::resources::ResourceResolver;

#[derive(Serialize)]
struct ManifestContext {
    short_name: String,
    name: String,
    description: String,
    default_icon: String,
    large_icon: String,
    svg_icon: String,
    maskable_icon: String,
    background_color: String,
    theme_color: String,
    scope: String,
    start_url: String,
}

/// Navigation scope: the resolved root, always ending with `/`.
pub fn scope(resolver: &dyn ResourceResolver) -> String {
    let mut scope = resolver.resolve("/");
    if scope != "/" && !scope.ends_with('/') {
        scope.push('/');
    }
    scope
}

/// Render the web app manifest.
pub fn manifest(
    config: &AppConfig,
    resolver: &dyn ResourceResolver,
) -> Result<String, TemplateError> {
    let resolve = |path: &str| json_string(&resolver.resolve(path));

    render(
        "manifest.webmanifest",
        MANIFEST_TEMPLATE,
        ManifestContext {
            short_name: json_string(&config.short_name),
            name: json_string(&config.name),
            description: json_string(&config.description),
            default_icon: resolve(&config.icon.default),
            large_icon: resolve(&config.icon.large),
            svg_icon: resolve(&config.icon.svg),
            maskable_icon: resolve(&config.icon.maskable),
            background_color: json_string(&config.background_color),
            theme_color: json_string(&config.theme_color),
            scope: json_string(&scope(resolver)),
            start_url: resolve("/"),
        },
    )
}
