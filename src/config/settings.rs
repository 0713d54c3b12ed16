//! User settings for passwallet
//!
//! Stored as `config.json` in the base directory. Every field has a serde
//! default so older or hand-edited files keep loading.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::WalletPaths;
use crate::error::WalletError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of backups to keep; older ones are deleted
    #[serde(default = "default_keep_count")]
    pub keep_count: usize,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            keep_count: default_keep_count(),
        }
    }
}

/// User settings for passwallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Copy the wallet file into backups/ before every save
    #[serde(default = "default_true")]
    pub auto_backup: bool,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Mask sensitive field values when displaying items
    #[serde(default = "default_true")]
    pub mask_sensitive: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_keep_count() -> usize {
    10
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            auto_backup: true,
            backup_retention: BackupRetention::default(),
            mask_sensitive: true,
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Defaults are not written; the caller decides when to persist.
    pub fn load_or_create(paths: &WalletPaths) -> Result<Self, WalletError> {
        let settings: Self = read_json(&paths.settings_file()).map_err(|e| match e {
            WalletError::Json(msg) => {
                WalletError::Config(format!("Failed to parse settings file: {}", msg))
            }
            other => other,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), WalletError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(WalletError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WalletPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }

    /// Format a Unix timestamp with the configured date format (UTC)
    ///
    /// Falls back to the raw number if the timestamp is out of range or the
    /// format cannot be rendered.
    pub fn format_timestamp(&self, timestamp: u64) -> String {
        let Some(dt) = i64::try_from(timestamp)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        else {
            return timestamp.to_string();
        };

        let mut out = String::new();
        match write!(out, "{}", dt.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => timestamp.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.auto_backup);
        assert!(settings.mask_sensitive);
        assert_eq!(settings.backup_retention.keep_count, 10);
        assert_eq!(settings.date_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.auto_backup = false;
        settings.backup_retention.keep_count = 3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.auto_backup);
        assert_eq!(loaded.backup_retention.keep_count, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"mask_sensitive": false}"#).unwrap();
        assert!(!settings.mask_sensitive);
        assert!(settings.auto_backup);
        assert_eq!(settings.backup_retention.keep_count, 10);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let settings = Settings {
            date_format: "%Q".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(settings.format_timestamp(1493189805), "1493189805");
    }

    #[test]
    fn test_invalid_date_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn test_format_timestamp() {
        let settings = Settings::default();
        assert_eq!(settings.format_timestamp(1493189805), "2017-04-26 06:56:45");
    }
}
