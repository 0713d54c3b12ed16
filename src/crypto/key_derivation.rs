//! Key derivation using Argon2id
//!
//! Derives the wallet key from the user's password using Argon2id, a
//! memory-hard key derivation function resistant to GPU/ASIC attacks.
//!
//! The salt is a fixed application constant rather than a per-vault random
//! value: every device that knows the password derives the same key without
//! storing anything next to the vault. Changing the salt or the default
//! parameters makes existing vaults unreadable.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{WalletError, WalletResult};

/// Application-wide salt for key derivation
pub const APPLICATION_SALT: &[u8] = b"passwallet/wallet-key/v0";

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Memory cost in KiB (64 MiB)
pub const DEFAULT_MEMORY_COST: u32 = 65536;

/// Number of passes
pub const DEFAULT_TIME_COST: u32 = 3;

/// Parallelism degree
pub const DEFAULT_PARALLELISM: u32 = 4;

/// Cost parameters for key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism degree
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            memory_cost: DEFAULT_MEMORY_COST,
            time_cost: DEFAULT_TIME_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl KeyDerivationParams {
    /// Create params with specific values
    pub fn with_values(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }
}

/// A derived encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the wallet key from a password
///
/// Deterministic: the same password and params always give the same key.
/// Any failure of the underlying hash (invalid params, allocation failure)
/// is reported as `KeyDerivationFailed`; no fallback key is produced.
pub fn derive_key(password: &[u8], params: &KeyDerivationParams) -> WalletResult<DerivedKey> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| WalletError::KeyDerivationFailed(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = DerivedKey { key: [0u8; KEY_LEN] };
    argon2
        .hash_password_into(password, APPLICATION_SALT, &mut key.key)
        .map_err(|e| WalletError::KeyDerivationFailed(e.to_string()))?;

    Ok(key)
}
