//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check values that end up in headers or regexes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Malformed proxy resources are not errors; the handler drops them

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::HostConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("version {0:?} must be visible ASCII without quotes")]
    Version(String),

    #[error("route pattern {pattern:?} does not compile: {reason}")]
    RoutePattern { pattern: String, reason: String },

    #[error("library path {0:?} must start with '/'")]
    LibraryPath(String),
}

/// Check `config` and return every problem found.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.proxy_fetch_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("proxy_fetch_secs"));
    }

    if !is_valid_version(&config.app.version) {
        errors.push(ValidationError::Version(config.app.version.clone()));
    }

    for pattern in &config.app.route_patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            errors.push(ValidationError::RoutePattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    for lib in &config.libraries {
        if !lib.path.starts_with('/') {
            errors.push(ValidationError::LibraryPath(lib.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An empty version is valid: one is generated at startup.
pub fn is_valid_version(version: &str) -> bool {
    version.bytes().all(|b| b.is_ascii_graphic() && b != b'"')
}
