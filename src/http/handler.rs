//! The PWA request handler.
//!
//! # Responsibilities
//! - Derive defaults, assets, and lookup tables once, on first use
//! - Answer conditional requests from the site-wide ETag
//! - Dispatch to static files, cached PWA assets, proxy resources,
//!   libraries, or the page renderer
//!
//! # Design Decisions
//! - Initialization runs at most once; concurrent first requests block until
//!   it completes and never observe partial state
//! - Everything built at init is immutable, except the proxy cache
//! - Per-request failures become a status code plus a log event

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
};
use bytes::Bytes;
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::assets::{self, Library, TemplateError};
use crate::cache::{CacheItem, MemoryCache};
use crate::config::validation::is_valid_version;
use crate::config::AppConfig;
use crate::http::request::{request_id, with_path, RequestOrigin};
use crate::http::response;
use crate::observability::metrics;
use crate::page::{encode_document, render_page, DefaultShell, DocumentShell, Page, Routes};
use crate::proxy::{self, ProxyResource, ProxyTable};
use crate::resources::{FileServer, LocalDir, ResourceResolver};

const DEFAULT_THEME_COLOR: &str = "#2d2c2c";
const DEFAULT_NAME: &str = "App PWA";
const DEFAULT_ICON: &str =
    "https://raw.githubusercontent.com/maxence-charriere/go-app/master/docs/web/icon.png";
const DEFAULT_SVG_ICON: &str =
    "https://raw.githubusercontent.com/maxence-charriere/go-app/master/docs/web/icon.svg";

/// Paths of the assets generated or bundled at init.
pub const PWA_RESOURCE_PATHS: &[&str] = &[
    "/wasm_exec.js",
    "/app.js",
    "/app-worker.js",
    "/manifest.webmanifest",
    "/app.css",
];

/// Errors that make the handler unusable. They come from bundled or
/// configured templates and settings, never from requests.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("version {0:?} cannot be used in an ETag")]
    Version(String),

    #[error("invalid route pattern: {0}")]
    Route(#[from] regex::Error),

    /// A previous initialization attempt failed; it is not retried.
    #[error("initialization failed earlier: {0}")]
    Failed(String),
}

/// State derived once from the configuration.
#[derive(Debug)]
pub struct Prepared {
    settings: AppConfig,
    etag: HeaderValue,
    resolver: Arc<dyn ResourceResolver>,
    files: Option<FileServer>,
    libraries: HashMap<String, Bytes>,
    routes: Routes,
    pwa_resources: MemoryCache,
    proxy_resources: ProxyTable,
    proxy_cache: MemoryCache,
}

impl Prepared {
    /// Configuration with every default applied.
    pub fn settings(&self) -> &AppConfig {
        &self.settings
    }

    pub fn version(&self) -> &str {
        &self.settings.version
    }

    /// Quoted version, as sent in the `ETag` header.
    pub fn etag(&self) -> &str {
        self.etag.to_str().unwrap_or_default()
    }

    pub fn proxy_resources(&self) -> &ProxyTable {
        &self.proxy_resources
    }

    /// Proxy resource fetched and cached under its public path.
    pub fn cached_proxy_resource(&self, path: &str) -> Option<CacheItem> {
        self.proxy_cache.get(path)
    }

    /// Library mount paths, sorted.
    pub fn library_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.libraries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Serves a WebAssembly progressive web app.
///
/// Built from an [`AppConfig`] and optional collaborators, then shared
/// (`Arc`) between requests.
#[derive(Debug)]
pub struct Handler {
    config: AppConfig,
    resources: Option<Arc<dyn ResourceResolver>>,
    libraries: Vec<Arc<dyn Library>>,
    shell: Arc<dyn DocumentShell>,
    client: reqwest::Client,
    fetch_timeout: Duration,
    prepared: OnceCell<Result<Prepared, String>>,
}

impl Handler {
    /// Create a handler. The resolver described by `config.resources` is
    /// used unless [`Handler::with_resources`] overrides it.
    pub fn new(config: AppConfig) -> Self {
        let resources = config.resources.as_ref().map(|r| r.build());
        Self {
            config,
            resources,
            libraries: Vec::new(),
            shell: Arc::new(DefaultShell),
            client: reqwest::Client::new(),
            fetch_timeout: Duration::from_secs(30),
            prepared: OnceCell::new(),
        }
    }

    pub fn with_resources(mut self, resources: impl ResourceResolver + 'static) -> Self {
        self.resources = Some(Arc::new(resources));
        self
    }

    pub fn with_library(mut self, library: impl Library + 'static) -> Self {
        self.libraries.push(Arc::new(library));
        self
    }

    pub fn with_shell(mut self, shell: impl DocumentShell + 'static) -> Self {
        self.shell = Arc::new(shell);
        self
    }

    /// HTTP client used for proxy resource fetches.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Run initialization now instead of on the first request.
    ///
    /// Initialization runs once. Later calls return the state it built, or
    /// [`InitError::Failed`] carrying the first error.
    pub fn prepare(&self) -> Result<&Prepared, InitError> {
        let mut first_error = None;
        let outcome = self.prepared.get_or_init(|| {
            self.init().map_err(|e| {
                let message = e.to_string();
                tracing::error!(error = %message, "Handler initialization failed");
                first_error = Some(e);
                message
            })
        });

        match (outcome, first_error) {
            (Ok(prepared), _) => Ok(prepared),
            (Err(_), Some(e)) => Err(e),
            (Err(message), None) => Err(InitError::Failed(message.clone())),
        }
    }

    fn init(&self) -> Result<Prepared, InitError> {
        let mut settings = self.config.clone();

        if settings.version.is_empty() {
            settings.version = generate_version();
        }
        if !is_valid_version(&settings.version) {
            return Err(InitError::Version(settings.version));
        }
        let etag = HeaderValue::from_str(&format!("\"{}\"", settings.version))
            .map_err(|_| InitError::Version(settings.version.clone()))?;

        let resolver = self
            .resources
            .clone()
            .unwrap_or_else(|| Arc::new(LocalDir::new("")));
        let files = resolver.file_server();

        let (libraries, library_paths) = self.collect_libraries();
        let mut styles = Vec::with_capacity(1 + library_paths.len() + settings.styles.len());
        styles.push("/app.css".to_string());
        styles.extend(library_paths);
        styles.append(&mut settings.styles);
        settings.styles = styles;

        if settings.service_worker_template.is_empty() {
            settings.service_worker_template = assets::DEFAULT_WORKER_TEMPLATE.to_string();
        }
        init_icon(&mut settings);
        init_display(&mut settings);

        let routes = Routes::new(&settings.routes, &settings.route_patterns)?;
        let pwa_resources = build_pwa_resources(&settings, resolver.as_ref())?;

        let proxy_resources = ProxyTable::build(&settings.proxy_resources);
        let proxy_cache = MemoryCache::new(proxy_resources.len());

        tracing::info!(
            version = %settings.version,
            libraries = libraries.len(),
            proxy_resources = proxy_resources.len(),
            serves_files = files.is_some(),
            "Handler initialized"
        );
        metrics::record_cache_size("pwa", pwa_resources.len());

        Ok(Prepared {
            settings,
            etag,
            resolver,
            files,
            libraries,
            routes,
            pwa_resources,
            proxy_resources,
            proxy_cache,
        })
    }

    /// Libraries with a mount path and a stylesheet, plus their paths in
    /// configuration order.
    fn collect_libraries(&self) -> (HashMap<String, Bytes>, Vec<String>) {
        let mut libraries = HashMap::new();
        let mut paths = Vec::new();
        for lib in &self.libraries {
            let (path, css) = lib.styles();
            if !path.starts_with('/') || css.is_empty() {
                tracing::debug!(path = %path, "Skipping library without mount path or styles");
                continue;
            }
            if libraries.insert(path.clone(), Bytes::from(css)).is_none() {
                paths.push(path);
            }
        }
        (libraries, paths)
    }

    /// Serve one request.
    ///
    /// # Panics
    /// If initialization fails. Use [`Handler::prepare`] at startup to
    /// surface the error before traffic arrives.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let prepared = self
            .prepare()
            .unwrap_or_else(|e| panic!("initializing handler failed: {}", e));

        let (kind, mut response) = self.dispatch(prepared, request).await;
        response::stamp(&mut response, &prepared.etag);
        metrics::record_request(kind, response.status().as_u16(), start);
        response
    }

    async fn dispatch(
        &self,
        prepared: &Prepared,
        request: Request<Body>,
    ) -> (&'static str, Response) {
        let if_none_match = request.headers().get(header::IF_NONE_MATCH);
        if if_none_match.map(HeaderValue::as_bytes) == Some(prepared.etag.as_bytes()) {
            return ("not_modified", response::status(StatusCode::NOT_MODIFIED));
        }

        let mut path = request.uri().path().to_string();
        let version_prefix = format!("/{}/", prepared.settings.version);
        if path.starts_with(&version_prefix) {
            path.replace_range(..version_prefix.len() - 1, "");
        }

        if let Some(files) = &prepared.files {
            if path.starts_with("/web/") {
                return ("static", serve_file(files, request, &path).await);
            }
        }

        let path = match path.as_str() {
            "/goapp.js" => "/app.js".to_string(),
            "/manifest.json" => "/manifest.webmanifest".to_string(),
            "/app.wasm" | "/goapp.wasm" => {
                let response = match &prepared.files {
                    Some(files) => {
                        let wasm = prepared.resolver.resolve("/web/app.wasm");
                        serve_file(files, request, &wasm).await
                    }
                    None => response::status(StatusCode::NOT_FOUND),
                };
                return ("wasm", response);
            }
            _ => path,
        };

        if let Some(item) = prepared.pwa_resources.get(&path) {
            return ("pwa", response::cached_item(&item));
        }

        if let Some(resource) = prepared.proxy_resources.get(&path) {
            let origin = RequestOrigin::of(&request);
            return ("proxy", self.serve_proxy_resource(prepared, resource, origin).await);
        }

        if let Some(css) = prepared.libraries.get(&path) {
            return ("library", response::css(css.clone()));
        }

        ("page", self.serve_page(prepared, &request, &path))
    }

    async fn serve_proxy_resource(
        &self,
        prepared: &Prepared,
        resource: &ProxyResource,
        origin: RequestOrigin,
    ) -> Response {
        if let Some(item) = prepared.proxy_cache.get(&resource.path) {
            return response::cached_item(&item);
        }

        let url = if prepared.files.is_some() {
            match origin.url(&resource.resource_path) {
                Some(url) => url,
                None => {
                    tracing::error!(
                        request_id = %origin.request_id,
                        proxy_path = %resource.path,
                        static_resource_path = %resource.resource_path,
                        "Getting proxy static resource failed: request has no host"
                    );
                    return response::status(StatusCode::INTERNAL_SERVER_ERROR);
                }
            }
        } else {
            prepared.resolver.resolve(&resource.resource_path)
        };

        match proxy::fetch(&self.client, &url, &resource.path, self.fetch_timeout).await {
            Ok(item) => {
                metrics::record_proxy_fetch("ok");
                prepared.proxy_cache.set(item.clone());
                metrics::record_cache_size("proxy", prepared.proxy_cache.len());
                response::cached_item(&item)
            }
            Err(e) => {
                metrics::record_proxy_fetch(e.kind());
                let status = e.status_code();
                if status.is_server_error() {
                    tracing::error!(
                        request_id = %origin.request_id,
                        url = %url,
                        proxy_path = %resource.path,
                        static_resource_path = %resource.resource_path,
                        error = %e,
                        "Getting proxy static resource failed"
                    );
                } else {
                    tracing::debug!(
                        url = %url,
                        proxy_path = %resource.path,
                        error = %e,
                        "Proxy static resource not found"
                    );
                }
                response::status(status)
            }
        }
    }

    fn serve_page(&self, prepared: &Prepared, request: &Request<Body>, path: &str) -> Response {
        if !prepared.routes.routed(path) {
            return response::status(StatusCode::NOT_FOUND);
        }

        let settings = &prepared.settings;
        let url = match request.uri().query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        };
        let page = Page {
            title: settings.title.clone(),
            lang: settings.lang.clone(),
            description: settings.description.clone(),
            author: settings.author.clone(),
            keywords: settings.keywords.clone(),
            loading_label: settings.loading_label.replace("{progress}", "0"),
            image: settings.image.clone(),
            url,
        };

        let document = render_page(
            settings,
            &page,
            prepared.resolver.as_ref(),
            self.shell.as_ref(),
        );
        match encode_document(&document) {
            Ok(html) => response::html(html),
            Err(e) => {
                tracing::error!(
                    request_id = %request_id(request),
                    path = %path,
                    error = %e,
                    "Encoding html document failed"
                );
                response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

async fn serve_file(files: &FileServer, request: Request<Body>, path: &str) -> Response {
    match with_path(request, path) {
        Ok(request) => files.serve(request).await,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Rewriting static resource request failed");
            response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Version derived from the current time. Differs on every process start.
fn generate_version() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let digest = Sha256::digest(now.to_string().as_bytes());
    format!("{:x}", digest)[..40].to_string()
}

fn init_icon(settings: &mut AppConfig) {
    let icon = &mut settings.icon;
    if icon.default.is_empty() {
        icon.default = DEFAULT_ICON.to_string();
        icon.large = DEFAULT_ICON.to_string();
    }
    if icon.large.is_empty() {
        icon.large = icon.default.clone();
    }
    if icon.maskable.is_empty() {
        icon.maskable = icon.default.clone();
    }
    if icon.svg.is_empty() {
        icon.svg = DEFAULT_SVG_ICON.to_string();
    }
}

fn init_display(settings: &mut AppConfig) {
    if settings.name.is_empty() && settings.short_name.is_empty() && settings.title.is_empty() {
        settings.name = DEFAULT_NAME.to_string();
    }
    if settings.short_name.is_empty() {
        settings.short_name = settings.name.clone();
    }
    if settings.name.is_empty() {
        settings.name = settings.short_name.clone();
    }
    if settings.background_color.is_empty() {
        settings.background_color = DEFAULT_THEME_COLOR.to_string();
    }
    if settings.theme_color.is_empty() {
        settings.theme_color = DEFAULT_THEME_COLOR.to_string();
    }
    if settings.lang.is_empty() {
        settings.lang = "en".to_string();
    }
    if settings.loading_label.is_empty() {
        settings.loading_label = "{progress}%".to_string();
    }
}

fn build_pwa_resources(
    settings: &AppConfig,
    resolver: &dyn ResourceResolver,
) -> Result<MemoryCache, TemplateError> {
    let cache = MemoryCache::new(PWA_RESOURCE_PATHS.len());
    cache.set(CacheItem::new(
        "/wasm_exec.js",
        "application/javascript",
        assets::WASM_EXEC_JS,
    ));
    cache.set(CacheItem::new(
        "/app.js",
        "application/javascript",
        assets::app_js(settings, resolver)?,
    ));
    cache.set(CacheItem::new(
        "/app-worker.js",
        "application/javascript",
        assets::app_worker_js(settings, resolver, &settings.service_worker_template)?,
    ));
    cache.set(CacheItem::new(
        "/manifest.webmanifest",
        "application/manifest+json",
        assets::manifest(settings, resolver)?,
    ));
    cache.set(CacheItem::new("/app.css", "text/css", assets::APP_CSS));
    Ok(cache)
}
