//! Static website export.

use pwa_host::assets::StaticLibrary;
use pwa_host::config::AppConfig;
use pwa_host::export::{generate_static_website, ExportError};
use pwa_host::http::Handler;
use pwa_host::resources::PrefixedLocation;

fn handler() -> Handler {
    let mut app = AppConfig::default();
    app.version = "1.0.0".into();
    app.title = "Docs".into();
    app.routes = vec!["/".into(), "/guide".into()];
    app.route_patterns = vec!["/docs/.+".into()];
    Handler::new(app)
        .with_resources(PrefixedLocation::new("site"))
        .with_library(StaticLibrary::new("/theme.css", ".theme {}"))
}

#[tokio::test]
async fn test_export_writes_assets_and_pages() {
    let out = tempfile::tempdir().unwrap();
    let pages = vec!["/docs/intro".to_string()];

    let files = generate_static_website(out.path(), &handler(), &pages).await.unwrap();

    for file in [
        "wasm_exec.js",
        "app.js",
        "app-worker.js",
        "manifest.webmanifest",
        "app.css",
        "theme.css",
        "index.html",
        "guide.html",
        "docs/intro.html",
    ] {
        let path = out.path().join(file);
        assert!(path.is_file(), "{} missing", file);
        assert!(files.contains(&path), "{} not reported", file);
    }

    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("<title>Docs</title>"));

    let manifest = std::fs::read_to_string(out.path().join("manifest.webmanifest")).unwrap();
    assert!(manifest.contains("\"/site/\""));

    let theme = std::fs::read_to_string(out.path().join("theme.css")).unwrap();
    assert_eq!(theme, ".theme {}");
}

#[tokio::test]
async fn test_export_unrouted_page_fails() {
    let out = tempfile::tempdir().unwrap();
    let pages = vec!["/nowhere".to_string()];

    let err = generate_static_website(out.path(), &handler(), &pages).await.unwrap_err();
    assert!(matches!(err, ExportError::Status { ref path, .. } if path == "/nowhere"));
}

#[tokio::test]
async fn test_export_rejects_relative_page() {
    let out = tempfile::tempdir().unwrap();
    let pages = vec!["../escape".to_string()];

    let err = generate_static_website(out.path(), &handler(), &pages).await.unwrap_err();
    assert!(matches!(err, ExportError::Path(_)));
}
