//! Configuration for the program registry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Registry configuration, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Query configuration
    pub query: QueryConfig,
    /// Phase estimation configuration
    pub estimator: EstimatorConfig,
    /// Catalog sources
    pub catalogs: CatalogSourceConfig,
    /// Audit configuration
    pub audit: AuditConfig,
    /// Ward coverage thresholds
    pub coverage: CoverageConfig,
}

impl RegistryConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load config from YAML and validate it.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::from_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Reject settings the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.page_size == 0 {
            return Err(ConfigError::Invalid("query.page_size must be at least 1".into()));
        }
        if self.query.all_sentinel.trim().is_empty() {
            return Err(ConfigError::Invalid("query.all_sentinel must not be empty".into()));
        }
        if self.coverage.minimum_percent > self.coverage.target_percent {
            return Err(ConfigError::Invalid(format!(
                "coverage.minimum_percent ({}) exceeds coverage.target_percent ({})",
                self.coverage.minimum_percent, self.coverage.target_percent
            )));
        }
        Ok(())
    }
}

/// Query configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Programs per page
    pub page_size: usize,
    /// Filter value meaning "no restriction"
    pub all_sentinel: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            all_sentinel: "all".to_string(),
        }
    }
}

/// Phase estimation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Estimate phases for programs without one. When disabled, such programs
    /// start at the beginning of their cycle.
    pub enabled: bool,
    /// Fixed seed for reproducible estimates
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
        }
    }
}

/// Where department catalogs come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSourceConfig {
    /// Register the bundled departments
    pub include_bundled: bool,
    /// Extra department seed files (YAML or JSON)
    pub paths: Vec<PathBuf>,
}

impl Default for CatalogSourceConfig {
    fn default() -> Self {
        Self {
            include_bundled: true,
            paths: Vec::new(),
        }
    }
}

/// Audit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Emit a warning log line per finding
    pub log_warnings: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { log_warnings: true }
    }
}

/// Ward insurance coverage thresholds (percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub minimum_percent: f64,
    pub target_percent: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            minimum_percent: 50.0,
            target_percent: 75.0,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.query.page_size, 10);
        assert_eq!(config.query.all_sentinel, "all");
        assert!(config.estimator.enabled);
        assert!(config.catalogs.include_bundled);
        assert!(config.audit.log_warnings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = RegistryConfig::default();
        config.estimator.seed = Some(2082);
        config.catalogs.paths.push(PathBuf::from("departments/water.yaml"));
        let yaml = config.to_yaml().unwrap();
        let parsed = RegistryConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = RegistryConfig::from_yaml("query:\n  page_size: 25\n").unwrap();
        assert_eq!(config.query.page_size, 25);
        assert_eq!(config.query.all_sentinel, "all");
        assert_eq!(config.coverage.target_percent, 75.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RegistryConfig::default();
        config.query.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = RegistryConfig::default();
        config.query.all_sentinel = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = RegistryConfig::default();
        config.coverage.minimum_percent = 80.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_validates() {
        assert!(RegistryConfig::parse("query:\n  page_size: 5\n").is_ok());
        assert!(matches!(
            RegistryConfig::parse("query:\n  page_size: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RegistryConfig::parse("query: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
