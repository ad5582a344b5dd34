//! Configuration file discovery and loading.
//!
//! Layers are merged in this order (later overrides earlier):
//! 1. User global config (`~/.tcltk-setup/config.yml`)
//! 2. Project config (`./.tcltk-setup.yml`)
//! 3. Explicit `--config <path>`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::merger::merge_configs;
use crate::config::schema::SetupConfig;
use crate::config::validator::validate;
use crate::error::{Result, SetupError};

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = ".tcltk-setup.yml";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `~/.tcltk-setup/config.yml`
    pub user_global: Option<PathBuf>,

    /// `<project>/.tcltk-setup.yml`
    pub project: Option<PathBuf>,

    /// Passed with `--config`; must exist.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: existing(project_root.join(PROJECT_CONFIG_FILE)),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        existing(dirs::home_dir()?.join(".tcltk-setup").join("config.yml"))
    }

    /// All configured paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global
            .iter()
            .chain(self.project.iter())
            .chain(self.explicit.iter())
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| SetupError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge and validate the given layers. No layers gives the defaults.
pub fn load_config_from(paths: &ConfigPaths) -> Result<SetupConfig> {
    let layers = paths.all();
    let mut values = Vec::with_capacity(layers.len());
    for path in &layers {
        debug!(path = %path.display(), "Loading config layer");
        values.push(load_config_value(path)?);
    }

    let merged = merge_configs(&values);
    let config: SetupConfig =
        serde_yaml::from_value(merged).map_err(|e| SetupError::ConfigParseError {
            path: layers
                .last()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE)),
            message: format!("Failed to parse merged config: {}", e),
        })?;

    validate(&config)?;
    Ok(config)
}

/// Discover, merge and validate configuration for `project_root`.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<SetupConfig> {
    load_config_from(&ConfigPaths::discover(project_root, explicit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(project: Option<PathBuf>, explicit: Option<PathBuf>) -> ConfigPaths {
        ConfigPaths {
            user_global: None,
            project,
            explicit,
        }
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "log_file: x.log").unwrap();

        let found = ConfigPaths::discover(temp.path(), None);
        assert_eq!(found.project, Some(temp.path().join(PROJECT_CONFIG_FILE)));
        assert!(found.explicit.is_none());
    }

    #[test]
    fn discover_skips_missing_project_config() {
        let temp = TempDir::new().unwrap();
        let found = ConfigPaths::discover(temp.path(), None);
        assert!(found.project.is_none());
    }

    #[test]
    fn no_layers_gives_defaults() {
        let config = load_config_from(&paths(None, None)).unwrap();
        assert_eq!(config, SetupConfig::default());
    }

    #[test]
    fn explicit_overrides_project() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join(PROJECT_CONFIG_FILE);
        let explicit = temp.path().join("override.yml");
        fs::write(&project, "retry:\n  max_attempts: 4\n  base_delay_secs: 1\n").unwrap();
        fs::write(&explicit, "retry:\n  max_attempts: 7\n").unwrap();

        let config = load_config_from(&paths(Some(project), Some(explicit))).unwrap();
        assert_eq!(config.retry.max_attempts, 7);
        assert_eq!(config.retry.base_delay_secs, 1);
    }

    #[test]
    fn missing_explicit_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, SetupError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join(PROJECT_CONFIG_FILE);
        fs::write(&project, "retry: [unclosed").unwrap();

        let err = load_config_from(&paths(Some(project), None)).unwrap_err();
        assert!(matches!(err, SetupError::ConfigParseError { .. }));
    }

    #[test]
    fn validation_runs_after_merge() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join(PROJECT_CONFIG_FILE);
        fs::write(&project, "retry:\n  max_attempts: 0\n").unwrap();

        let err = load_config_from(&paths(Some(project), None)).unwrap_err();
        assert!(matches!(err, SetupError::ConfigValidationError { .. }));
    }
}
