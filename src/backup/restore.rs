//! Backup restoration for passwallet

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::paths::WalletPaths;
use crate::error::WalletResult;
use crate::serialization::peek_timestamp;
use crate::storage::file_io::{read_to_string, write_atomic};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: WalletPaths,
}

impl RestoreManager {
    pub fn new(paths: WalletPaths) -> Self {
        Self { paths }
    }

    /// Check that a file is a readable wallet envelope
    ///
    /// Only the envelope is checked; decrypting it needs the password.
    /// Returns the wallet timestamp.
    pub fn validate_backup(&self, backup_path: &Path) -> WalletResult<u64> {
        peek_timestamp(&read_to_string(backup_path)?)
    }

    /// Overwrite the wallet file with a backup
    pub fn restore_from_file(&self, backup_path: &Path) -> WalletResult<RestoreResult> {
        let contents = read_to_string(backup_path)?;
        let wallet_timestamp = peek_timestamp(&contents)?;

        self.paths.ensure_directories()?;
        write_atomic(self.paths.wallet_file(), contents.as_bytes())?;

        info!(
            from = %backup_path.display(),
            wallet_timestamp,
            "restored wallet from backup"
        );

        Ok(RestoreResult {
            restored_from: backup_path.to_path_buf(),
            wallet_timestamp,
            safety_backup: None,
        })
    }
}

/// Result of a restore operation
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// Backup file that was restored
    pub restored_from: PathBuf,
    /// Timestamp of the restored wallet
    pub wallet_timestamp: u64,
    /// Backup of the wallet that was replaced, if there was one
    pub safety_backup: Option<PathBuf>,
}
