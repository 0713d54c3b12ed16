//! Path management for passwallet
//!
//! ## Path Resolution Order
//!
//! 1. `PASSWALLET_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/passwallet` or `~/.config/passwallet`
//! 3. Windows: `%APPDATA%\passwallet`

use std::path::{Path, PathBuf};

use crate::error::WalletError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "PASSWALLET_DATA_DIR";

const APP_DIR: &str = "passwallet";

/// Manages all paths used by passwallet
#[derive(Debug, Clone)]
pub struct WalletPaths {
    base_dir: PathBuf,
}

impl WalletPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is set.
    pub fn new() -> Result<Self, WalletError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create WalletPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the encrypted wallet
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Path to config.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the encrypted wallet envelope
    pub fn wallet_file(&self) -> PathBuf {
        self.data_dir().join("wallet.json")
    }

    /// Ensure base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| WalletError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| WalletError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Whether a wallet file has been created here
    pub fn is_initialized(&self) -> bool {
        self.wallet_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let config_base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                WalletError::Config(format!(
                    "HOME is not set; set {} to choose a data directory",
                    DATA_DIR_ENV
                ))
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let appdata = std::env::var_os("APPDATA")
        .ok_or_else(|| WalletError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = WalletPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.wallet_file(),
            temp_dir.path().join("data").join("wallet.json")
        );
    }
}
