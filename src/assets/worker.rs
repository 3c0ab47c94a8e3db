//! `/app-worker.js` generation.

use serde::Serialize;
use std::collections::HashSet;

use super::{json_string, render, TemplateError};
use crate::config::AppConfig;
use crate::resources::{HttpResource, ResourceResolver};

const CORE_RESOURCES: &[&str] = &[
    "/app.css",
    "/app.js",
    "/manifest.webmanifest",
    "/wasm_exec.js",
    "/",
    "/web/app.wasm",
];

#[derive(Serialize)]
struct WorkerContext<'a> {
    version: &'a str,
    resources_to_cache: String,
}

/// Every URL the service worker caches for offline use: deduplicated,
/// resolved and sorted.
pub fn resources_to_cache(config: &AppConfig, resolver: &dyn ResourceResolver) -> Vec<String> {
    let icons = [
        config.icon.default.as_str(),
        config.icon.large.as_str(),
        config.icon.maskable.as_str(),
    ];
    let configured = config
        .styles
        .iter()
        .chain(&config.fonts)
        .chain(&config.scripts)
        .chain(&config.cacheable_resources)
        .map(String::as_str);

    let mut seen = HashSet::new();
    let mut urls: Vec<String> = CORE_RESOURCES
        .iter()
        .copied()
        .chain(icons)
        .chain(configured)
        .map(|r| HttpResource::parse(r).url)
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .map(|url| resolver.resolve(&url))
        .collect();

    urls.sort();
    urls.dedup();
    urls
}

/// Render the service worker from `template`.
pub fn app_worker_js(
    config: &AppConfig,
    resolver: &dyn ResourceResolver,
    template: &str,
) -> Result<String, TemplateError> {
    render(
        "app-worker.js",
        template,
        WorkerContext {
            version: &config.version,
            resources_to_cache: json_string(&resources_to_cache(config, resolver)),
        },
    )
}
