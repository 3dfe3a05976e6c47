//! hexbrain configuration management

use crate::error::{Error, Result};
use crate::matching::DEFAULT_THRESHOLD;
use crate::paths::DataPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main hexbrain configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HexConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Fuzzy matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Reminder configuration
    #[serde(default)]
    pub reminders: ReminderConfig,
}

impl HexConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matching.threshold) {
            return Err(Error::Config(format!(
                "matching.threshold must be within [0, 1], got {}",
                self.matching.threshold
            )));
        }
        if self.reminders.poll_interval_secs == 0 {
            return Err(Error::Config(
                "reminders.poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON documents
    pub data_dir: PathBuf,

    /// Base directory for exports
    pub export_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DataPaths::default_dir(),
            export_dir: DataPaths::default_export_dir(),
        }
    }
}

/// Fuzzy matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity for two strings to count as a match
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Reminder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// How often `remind watch` checks for due reminders
    pub poll_interval_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = HexConfig::default();
        assert_eq!(config.matching.threshold, 0.8);
        assert_eq!(config.reminders.poll_interval_secs, 30);
        assert!(config.storage.data_dir.ends_with(".hexbrain/data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: HexConfig = toml::from_str("[matching]\nthreshold = 0.6\n").unwrap();
        assert_eq!(config.matching.threshold, 0.6);
        assert_eq!(config.reminders.poll_interval_secs, 30);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/hex\"\nexport_dir = \"/tmp/hex-out\"\n\n[reminders]\npoll_interval_secs = 5\n",
        )
        .unwrap();

        let config = HexConfig::from_file(&path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/hex"));
        assert_eq!(config.reminders.poll_interval_secs, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = HexConfig::default();
        config.matching.threshold = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = HexConfig::default();
        config.reminders.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching\nthreshold = ").unwrap();
        assert!(matches!(HexConfig::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_round_trip_toml() {
        let toml = toml::to_string_pretty(&HexConfig::default()).unwrap();
        let parsed: HexConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.reminders.poll_interval_secs, 30);
    }
}
