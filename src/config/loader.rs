//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::StaticLibrary;
use crate::config::schema::{HostConfig, LibraryConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<HostConfig, ConfigError> {
    let config: HostConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Read configured library stylesheets. Relative files are looked up from
/// `base_dir` (usually the config file directory).
pub fn load_libraries(
    libraries: &[LibraryConfig],
    base_dir: &Path,
) -> Result<Vec<StaticLibrary>, ConfigError> {
    libraries
        .iter()
        .map(|lib| {
            let file = base_dir.join(&lib.css_file);
            let css = fs::read_to_string(&file).map_err(|source| ConfigError::Io {
                path: file.clone(),
                source,
            })?;
            tracing::debug!(path = %lib.path, file = ?file, bytes = css.len(), "Library loaded");
            Ok(StaticLibrary::new(lib.path.clone(), css))
        })
        .collect()
}
