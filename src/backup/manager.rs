//! Backup manager for passwallet
//!
//! Backups live in `backups/` as `backup-YYYYMMDD-HHMMSS-mmm.json`; the
//! creation time is read back from the filename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{debug, info};

use crate::config::paths::WalletPaths;
use crate::config::settings::BackupRetention;
use crate::error::{WalletError, WalletResult};
use crate::serialization::peek_timestamp;
use crate::storage::file_io::{read_to_string, write_atomic};

use super::restore::{RestoreManager, RestoreResult};

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Timestamp of the wallet inside, if the envelope is readable
    pub wallet_timestamp: Option<u64>,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: WalletPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: WalletPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Copy the current wallet file into the backup directory
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> WalletResult<PathBuf> {
        let wallet_file = self.paths.wallet_file();
        if !wallet_file.exists() {
            return Err(WalletError::Storage(
                "No wallet file to back up; run `passwallet init` first".into(),
            ));
        }

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| WalletError::Io(format!("Failed to create backup directory: {}", e)))?;

        let contents = fs::read(&wallet_file)
            .map_err(|e| WalletError::Io(format!("Failed to read wallet for backup: {}", e)))?;

        let backup_path = self.next_backup_path(Utc::now());
        write_atomic(&backup_path, &contents)?;

        info!(path = %backup_path.display(), "created backup");
        Ok(backup_path)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> WalletResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> WalletResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| WalletError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| WalletError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete backups beyond `keep_count`, oldest first
    ///
    /// A `keep_count` of 0 is treated as 1 so the newest backup survives.
    pub fn enforce_retention(&self) -> WalletResult<Vec<PathBuf>> {
        let keep = self.retention.keep_count.max(1);
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(keep) {
            fs::remove_file(&backup.path)
                .map_err(|e| WalletError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            debug!(count = deleted.len(), "pruned old backups");
        }
        Ok(deleted)
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> WalletResult<Option<BackupInfo>> {
        // Only plain names inside the backup directory
        if Path::new(filename).file_name().map(|n| n != filename).unwrap_or(true) {
            return Ok(None);
        }
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> WalletResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Replace the wallet file with a backup
    ///
    /// The current wallet, if any, is backed up first so a restore can be
    /// undone.
    pub fn restore(&self, backup_path: &Path) -> WalletResult<RestoreResult> {
        let restorer = RestoreManager::new(self.paths.clone());
        let validated = restorer.validate_backup(backup_path)?;

        let safety_backup = if self.paths.wallet_file().exists() {
            Some(self.create_backup()?)
        } else {
            None
        };

        let mut result = restorer.restore_from_file(backup_path)?;
        result.wallet_timestamp = validated;
        result.safety_backup = safety_backup;
        Ok(result)
    }

    /// Path for a backup created at `now` that doesn't exist yet
    fn next_backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let mut now = now;
        loop {
            let filename = format!(
                "backup-{}-{:03}.json",
                now.format("%Y%m%d-%H%M%S"),
                now.timestamp_subsec_millis()
            );
            let path = self.backup_dir.join(filename);
            if !path.exists() {
                return path;
            }
            now += chrono::Duration::milliseconds(1);
        }
    }
}

/// Parse backup info from a backup file
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(date_part)?;

    let size_bytes = fs::metadata(path).ok()?.len();
    let wallet_timestamp = read_to_string(path)
        .ok()
        .and_then(|text| peek_timestamp(&text).ok());

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        wallet_timestamp,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = match parts.get(2) {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part.get(0..4)?.parse().ok()?;
    let month: u32 = date_part.get(4..6)?.parse().ok()?;
    let day: u32 = date_part.get(6..8)?.parse().ok()?;
    let hour: u32 = time_part.get(0..2)?.parse().ok()?;
    let minute: u32 = time_part.get(2..4)?.parse().ok()?;
    let second: u32 = time_part.get(4..6)?.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
