use crate::error::{MsgStoreError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings for the terminal client, stored in `config.json`.
///
/// Only settings live on disk. Directories and messages never do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Start the session with the sample folders and messages
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// strftime-style format for message creation dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Force colour on or off; auto-detected when absent
    #[serde(default)]
    pub color: Option<bool>,
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
            date_format: default_date_format(),
            color: None,
        }
    }
}

impl AppConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::load_file(config_dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Load config from an explicit file path, or return defaults if it does not exist
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(MsgStoreError::Io)?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(MsgStoreError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MsgStoreError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(MsgStoreError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(MsgStoreError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            return Err(MsgStoreError::Config("date_format cannot be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(MsgStoreError::Config(format!(
                "invalid date_format: {}",
                self.date_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.seed_sample_data);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.color, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested");

        let config = AppConfig {
            seed_sample_data: false,
            date_format: "%d/%m/%Y".into(),
            color: Some(false),
        };
        config.save(&dir).unwrap();

        let loaded = AppConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{ "seed_sample_data": false }"#).unwrap();

        let loaded = AppConfig::load_file(&path).unwrap();
        assert!(!loaded.seed_sample_data);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "date_format": "%Y-%" }"#).unwrap();

        let err = AppConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, MsgStoreError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, MsgStoreError::Serialization(_)));
    }
}
