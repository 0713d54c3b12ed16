//! Backup system for passwallet
//!
//! Backups are byte-for-byte copies of the encrypted wallet file, so they
//! need no password to create and stay encrypted at rest.
//!
//! - `BackupManager`: creates, lists and prunes backups
//! - `RestoreManager`: validates a backup and puts it back in place
//!
//! ```rust,ignore
//! use passwallet::backup::BackupManager;
//! use passwallet::config::{paths::WalletPaths, settings::BackupRetention};
//!
//! let manager = BackupManager::new(WalletPaths::new()?, BackupRetention::default());
//! let (backup_path, _pruned) = manager.create_backup_with_retention()?;
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};
