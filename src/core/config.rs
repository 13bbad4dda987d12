// src/core/config.rs

use crate::core::common::OxikdError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What a k-nearest query does when `k` exceeds the number of stored points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeighborPolicy {
    /// Vote over every stored point.
    #[default]
    Clamp,
    /// Reject the query with `InvalidQuery`.
    Strict,
}

/// Query configuration for a `KdTree`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Neighbor count used by `KdTree::classify`.
    pub default_k: usize,
    pub neighbor_policy: NeighborPolicy,
}

/// Builder for `Config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    default_k: Option<usize>,
    neighbor_policy: Option<NeighborPolicy>,
}

impl ConfigBuilder {
    /// Creates a new ConfigBuilder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the neighbor count used by `classify`
    #[must_use]
    pub fn default_k(mut self, k: usize) -> Self {
        self.default_k = Some(k);
        self
    }

    /// Sets the policy for queries asking for more neighbors than exist
    #[must_use]
    pub fn neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = Some(policy);
        self
    }

    /// Builds the Config instance with validation
    ///
    /// # Errors
    ///
    /// Returns `OxikdError::Configuration` if the resulting config is invalid.
    pub fn build(self) -> Result<Config, OxikdError> {
        let defaults = Config::default();
        let config = Config {
            default_k: self.default_k.unwrap_or(defaults.default_k),
            neighbor_policy: self.neighbor_policy.unwrap_or(defaults.neighbor_policy),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_k: 1,
            neighbor_policy: NeighborPolicy::Clamp,
        }
    }
}

impl Config {
    /// Creates a new ConfigBuilder for fluent configuration
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `OxikdError::Configuration` if `default_k` is zero.
    pub fn validate(&self) -> Result<(), OxikdError> {
        if self.default_k == 0 {
            return Err(OxikdError::Configuration(
                "default_k must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `OxikdError::Configuration` if parsing or validation fails, and
    /// `OxikdError::Io` for any other read failure.
    pub fn load_from_file(path: &Path) -> Result<Self, OxikdError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    OxikdError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                config.validate()?;
                debug!("Loaded config from '{}': {:?}", path.display(), config);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file '{}' not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(OxikdError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path.
    ///
    /// # Errors
    ///
    /// See `load_from_file`.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, OxikdError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// A configuration that refuses queries for more neighbors than exist.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            neighbor_policy: NeighborPolicy::Strict,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_k, 1);
        assert_eq!(config.neighbor_policy, NeighborPolicy::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .default_k(5)
            .neighbor_policy(NeighborPolicy::Strict)
            .build()
            .unwrap();
        assert_eq!(config.default_k, 5);
        assert_eq!(config.neighbor_policy, NeighborPolicy::Strict);

        let partial = Config::builder().default_k(3).build().unwrap();
        assert_eq!(partial.neighbor_policy, NeighborPolicy::Clamp);
    }

    #[test]
    fn test_config_validation() {
        let result = Config::builder().default_k(0).build();
        assert!(matches!(result, Err(OxikdError::Configuration(_))));
    }

    #[test]
    fn test_strict_preset() {
        let config = Config::strict();
        assert_eq!(config.neighbor_policy, NeighborPolicy::Strict);
        assert_eq!(config.default_k, 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_k = 7").unwrap();
        writeln!(file, "neighbor_policy = \"strict\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_k, 7);
        assert_eq!(config.neighbor_policy, NeighborPolicy::Strict);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_k = 4").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_k, 4);
        assert_eq!(config.neighbor_policy, NeighborPolicy::Clamp);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_k = \"many\"").unwrap();
        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(OxikdError::Configuration(_))));

        let mut zero = NamedTempFile::new().unwrap();
        writeln!(zero, "default_k = 0").unwrap();
        let result = Config::load_or_default(Some(zero.path()));
        assert!(matches!(result, Err(OxikdError::Configuration(_))));
    }

    #[test]
    fn test_serializes_to_toml() {
        let config = Config::strict();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("default_k = 1"));
        assert!(text.contains("neighbor_policy = \"strict\""));
    }
}
