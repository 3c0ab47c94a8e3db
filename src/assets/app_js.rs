//! `/app.js` generation.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{json_string, render, TemplateError, APP_JS_TEMPLATE};
use crate::config::AppConfig;
use crate::resources::ResourceResolver;

/// Reserved env keys; they always override user values.
pub const ENV_INTERNAL_URLS: &str = "APP_INTERNAL_URLS";
pub const ENV_VERSION: &str = "APP_VERSION";
pub const ENV_STATIC_RESOURCES_URL: &str = "APP_STATIC_RESOURCES_URL";
pub const ENV_ROOT_PREFIX: &str = "APP_ROOT_PREFIX";

#[derive(Serialize)]
struct AppJsContext {
    env: String,
    loading_label: String,
    wasm: String,
    wasm_content_length: String,
    wasm_content_length_header: String,
    worker_js: String,
}

/// Client environment: user variables merged with the reserved keys.
pub fn client_env(config: &AppConfig, resolver: &dyn ResourceResolver) -> BTreeMap<String, String> {
    let mut env = config.env.clone();
    env.insert(ENV_INTERNAL_URLS.to_string(), json_string(&config.internal_urls));
    env.insert(ENV_VERSION.to_string(), config.version.clone());
    env.insert(ENV_STATIC_RESOURCES_URL.to_string(), resolver.resolve("/web"));
    env.insert(ENV_ROOT_PREFIX.to_string(), resolver.resolve("/"));
    env
}

/// Render the bootstrap script.
pub fn app_js(
    config: &AppConfig,
    resolver: &dyn ResourceResolver,
) -> Result<String, TemplateError> {
    let env = client_env(config, resolver);
    if config.propagate_env {
        export_env(&env);
    }

    render(
        "app.js",
        APP_JS_TEMPLATE,
        AppJsContext {
            env: json_string(&env),
            loading_label: json_string(&config.loading_label),
            wasm: json_string(&resolver.resolve("/web/app.wasm")),
            wasm_content_length: json_string(&config.wasm_content_length),
            wasm_content_length_header: json_string(&config.wasm_content_length_header),
            worker_js: json_string(&resolver.resolve("/app-worker.js")),
        },
    )
}

/// Write variables into the process environment.
///
/// This mutates process-wide state: two handlers initializing in the same
/// process race on the reserved keys. Variables the platform would reject
/// are logged and skipped.
pub fn export_env(env: &BTreeMap<String, String>) {
    for (key, value) in env {
        if key.is_empty() || key.contains('=') || key.contains('\0') || value.contains('\0') {
            tracing::warn!(name = %key, value = %value, "Setting app env variable failed");
            continue;
        }
        std::env::set_var(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{LocalDir, RemoteBucket};

    #[test]
    fn test_reserved_keys_win() {
        let mut config = AppConfig::default();
        config.version = "v7".into();
        config.env.insert(ENV_VERSION.into(), "user".into());
        config.env.insert("API".into(), "https://api.test".into());
        config.internal_urls = vec!["https://docs.test".into()];

        let env = client_env(&config, &RemoteBucket::new("https://cdn.test"));
        assert_eq!(env[ENV_VERSION], "v7");
        assert_eq!(env["API"], "https://api.test");
        assert_eq!(env[ENV_INTERNAL_URLS], "[\"https://docs.test\"]");
        assert_eq!(env[ENV_STATIC_RESOURCES_URL], "https://cdn.test/web");
        assert_eq!(env[ENV_ROOT_PREFIX], "/");
    }

    #[test]
    fn test_app_js_substitution() {
        let mut config = AppConfig::default();
        config.version = "v7".into();
        config.loading_label = "Loading {progress}%".into();

        let js = app_js(&config, &LocalDir::new("")).unwrap();
        assert!(js.contains("\"Loading {progress}%\""));
        assert!(js.contains("\"/web/app.wasm\""));
        assert!(js.contains("\"/app-worker.js\""));
        assert!(js.contains("\"APP_VERSION\":\"v7\""));
        assert!(!js.contains("{{"));
    }

    #[test]
    fn test_export_env_skips_invalid() {
        let mut env = BTreeMap::new();
        env.insert("PWA_HOST_TEST_EXPORT".to_string(), "1".to_string());
        env.insert("BAD=KEY".to_string(), "1".to_string());
        export_env(&env);

        assert_eq!(std::env::var("PWA_HOST_TEST_EXPORT").unwrap(), "1");
        assert!(std::env::var_os("BAD").is_none());
    }
}
