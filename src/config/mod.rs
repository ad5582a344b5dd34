//! Configuration loading, merging and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use tcltk_setup::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".tcltk-setup.yml"), "retry:\n  max_attempts: 5\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.retry.max_attempts, 5);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_from, load_config_value, ConfigPaths, PROJECT_CONFIG_FILE};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    BindingSettings, ProbeSettings, RetrySettings, SearchSettings, SetupConfig,
    SmokeTestSettings, SymlinkSettings, DEFAULT_LOG_FILE,
};
pub use validator::{validate, validate_config, ValidationError};
