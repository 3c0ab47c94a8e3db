//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → app section handed to the Handler, the rest to the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the handler derives its defaults once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_libraries, parse_config, ConfigError};
pub use schema::{
    AppConfig, HostConfig, Icon, LibraryConfig, ObservabilityConfig, ResourcesConfig,
    ServerConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
