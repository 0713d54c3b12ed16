//! The encrypted wallet file
//!
//! `VaultStore` reads and writes `data/wallet.json`. It never holds the
//! password; callers pass a `Crypto` derived once per command.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::backup::BackupManager;
use crate::config::paths::WalletPaths;
use crate::config::settings::Settings;
use crate::crypto::Crypto;
use crate::error::{WalletError, WalletResult};
use crate::models::Wallet;
use crate::serialization::{load_with, peek_timestamp, save_with};

use super::file_io::{read_to_string, write_atomic};

/// Storage coordinator for the wallet file
pub struct VaultStore {
    paths: WalletPaths,
    settings: Settings,
}

impl VaultStore {
    pub fn new(paths: WalletPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    pub fn paths(&self) -> &WalletPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Path of the encrypted wallet file
    pub fn wallet_file(&self) -> PathBuf {
        self.paths.wallet_file()
    }

    /// Whether a wallet file exists
    pub fn exists(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Write a new, empty wallet
    ///
    /// Fails with `Duplicate` if a wallet file is already present.
    pub fn create(&self, crypto: &Crypto) -> WalletResult<Wallet> {
        if self.exists() {
            return Err(WalletError::Duplicate {
                entity_type: "Wallet",
                identifier: self.wallet_file().display().to_string(),
            });
        }

        self.paths.ensure_directories()?;
        let wallet = Wallet::new();
        self.write(&wallet, crypto)?;

        info!(path = %self.wallet_file().display(), "created wallet");
        Ok(wallet)
    }

    /// Read and decrypt the wallet
    pub fn load(&self, crypto: &Crypto) -> WalletResult<Wallet> {
        let text = self.read_envelope()?;
        let wallet = load_with(&text, crypto)?;
        debug!(items = wallet.len(), "loaded wallet");
        Ok(wallet)
    }

    /// Encrypt and write the wallet, backing up the previous file first
    /// when `auto_backup` is on
    pub fn save(&self, wallet: &Wallet, crypto: &Crypto) -> WalletResult<()> {
        if self.settings.auto_backup && self.exists() {
            let manager =
                BackupManager::new(self.paths.clone(), self.settings.backup_retention.clone());
            manager.create_backup_with_retention()?;
        }

        self.write(wallet, crypto)?;
        debug!(items = wallet.len(), timestamp = wallet.timestamp, "saved wallet");
        Ok(())
    }

    /// Timestamp of the stored wallet, readable without the password
    pub fn peek_timestamp(&self) -> WalletResult<u64> {
        peek_timestamp(&self.read_envelope()?)
    }

    fn read_envelope(&self) -> WalletResult<String> {
        if !self.exists() {
            return Err(WalletError::NotFound {
                entity_type: "Wallet",
                identifier: self.wallet_file().display().to_string(),
            });
        }
        read_to_string(self.wallet_file())
    }

    fn write(&self, wallet: &Wallet, crypto: &Crypto) -> WalletResult<()> {
        let text = save_with(wallet, crypto)?;
        write_atomic(self.wallet_file(), text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyDerivationParams;
    use crate::models::{Field, FieldType, Item};
    use tempfile::TempDir;

    fn crypto(password: &str) -> Crypto {
        Crypto::with_params(password, &KeyDerivationParams::with_values(1024, 1, 1)).unwrap()
    }

    fn create_test_store(auto_backup: bool) -> (VaultStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path());
        let settings = Settings {
            auto_backup,
            ..Settings::default()
        };
        (VaultStore::new(paths, settings), temp_dir)
    }

    #[test]
    fn test_create_and_load() {
        let (store, _temp) = create_test_store(true);
        let key = crypto("password");

        assert!(!store.exists());
        let created = store.create(&key).unwrap();
        assert!(store.exists());

        let loaded = store.load(&key).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let (store, _temp) = create_test_store(true);
        let key = crypto("password");

        store.create(&key).unwrap();
        let err = store.create(&key).unwrap_err();
        assert!(matches!(err, WalletError::Duplicate { .. }));
    }

    #[test]
    fn test_load_missing_wallet() {
        let (store, _temp) = create_test_store(true);
        assert!(store.load(&crypto("password")).unwrap_err().is_not_found());
        assert!(store.peek_timestamp().unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_round_trip() {
        let (store, _temp) = create_test_store(false);
        let key = crypto("password");
        let mut wallet = store.create(&key).unwrap();

        wallet
            .add_item(Item::with_fields(
                "Google",
                vec![Field::new("Password", "secret_pa55", FieldType::Password, true)],
            ))
            .unwrap();
        store.save(&wallet, &key).unwrap();

        assert_eq!(store.load(&key).unwrap(), wallet);
        assert_eq!(store.peek_timestamp().unwrap(), wallet.timestamp);
    }

    #[test]
    fn test_wrong_password_on_load() {
        let (store, _temp) = create_test_store(false);
        let wallet = store.create(&crypto("password")).unwrap();

        let err = store.load(&crypto("other")).unwrap_err();
        assert!(err.is_authentication_failure());
        assert_eq!(err.locked_wallet().unwrap().timestamp, wallet.timestamp);
    }

    #[test]
    fn test_save_backs_up_previous_file() {
        let (store, _temp) = create_test_store(true);
        let key = crypto("password");
        let wallet = store.create(&key).unwrap();
        let original = std::fs::read(store.wallet_file()).unwrap();

        store.save(&wallet, &key).unwrap();

        let manager = BackupManager::new(store.paths().clone(), Default::default());
        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0].path).unwrap(), original);
    }

    #[test]
    fn test_save_without_auto_backup() {
        let (store, _temp) = create_test_store(false);
        let key = crypto("password");
        let wallet = store.create(&key).unwrap();

        store.save(&wallet, &key).unwrap();

        let manager = BackupManager::new(store.paths().clone(), Default::default());
        assert!(manager.list_backups().unwrap().is_empty());
    }
}
