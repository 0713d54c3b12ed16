//! Per-invocation state shared by the command handlers
//!
//! Holds paths, settings and the password if one was supplied up front.
//! The key is derived at most once per command.

use crate::config::paths::WalletPaths;
use crate::config::settings::Settings;
use crate::crypto::{Crypto, SecureString};
use crate::error::{WalletError, WalletResult};
use crate::storage::VaultStore;

/// Environment variable read for the wallet password
pub const PASSWORD_ENV: &str = "PASSWALLET_PASSWORD";

pub struct Session {
    paths: WalletPaths,
    settings: Settings,
    password: Option<SecureString>,
}

impl Session {
    pub fn new(paths: WalletPaths, settings: Settings, password: Option<SecureString>) -> Self {
        Self {
            paths,
            settings,
            password,
        }
    }

    pub fn paths(&self) -> &WalletPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Store over the wallet file with the current settings
    pub fn store(&self) -> VaultStore {
        VaultStore::new(self.paths.clone(), self.settings.clone())
    }

    /// Derive the key for an existing wallet, prompting if needed
    pub fn unlock(&self) -> WalletResult<Crypto> {
        match &self.password {
            Some(password) => Crypto::new(password.as_str()),
            None => Crypto::new(prompt_password("Wallet password: ")?.as_str()),
        }
    }

    /// Derive the key for a new wallet, prompting twice if needed
    pub fn unlock_new(&self) -> WalletResult<Crypto> {
        if let Some(password) = &self.password {
            return new_wallet_crypto(password);
        }

        let first = prompt_password("New wallet password: ")?;
        let second = prompt_password("Confirm password: ")?;
        if first != second {
            return Err(WalletError::Validation("Passwords do not match".into()));
        }
        new_wallet_crypto(&first)
    }
}

fn new_wallet_crypto(password: &SecureString) -> WalletResult<Crypto> {
    if password.is_empty() {
        return Err(WalletError::Validation("Password must not be empty".into()));
    }
    Crypto::new(password.as_str())
}

pub(super) fn prompt_password(prompt: &str) -> WalletResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| {
            WalletError::Io(format!(
                "Failed to read password (or set {}): {}",
                PASSWORD_ENV, e
            ))
        })
}
