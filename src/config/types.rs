//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::registry::RegistryConfig;
use super::telemetry::TelemetryConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Framework configuration.
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Registry behavior shared by every core created from this config.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Log output configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

pub(super) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterestTracking;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.registry.interest_tracking, InterestTracking::Cached);
        assert_eq!(config.telemetry.filter, "info");
        assert!(!config.telemetry.json);
        assert!(config.telemetry.with_target);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            [registry]
            interest_tracking = "requery"

            [telemetry]
            filter = "multicore_mvc=trace"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.registry.interest_tracking, InterestTracking::Requery);
        assert_eq!(config.telemetry.filter, "multicore_mvc=trace");
        assert!(config.telemetry.json);
        assert!(config.telemetry.with_target);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[telemetry]\nwith_target = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.telemetry.with_target);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn unknown_tracking_mode_is_parse_error() {
        let err = Config::from_toml("[registry]\ninterest_tracking = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
