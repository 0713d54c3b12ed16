//! Cryptographic functions for passwallet
//!
//! Provides AES-256-GCM authenticated encryption keyed by an Argon2id
//! derivation of the wallet password.

pub mod codec;
pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{AeadCipher, Aes256GcmCipher, NONCE_SIZE};
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use secure_memory::{SecureBytes, SecureString};

use crate::error::WalletResult;

/// A password-bound cipher
///
/// Construction runs the key derivation; if it fails no instance exists, so
/// an unusable `Crypto` can never be used to encrypt or decrypt.
pub struct Crypto {
    cipher: Aes256GcmCipher,
}

impl Crypto {
    /// Derive the key for `password` with the default parameters
    pub fn new(password: &str) -> WalletResult<Self> {
        Self::with_params(password, &KeyDerivationParams::default())
    }

    /// Derive the key for `password` with explicit parameters
    pub fn with_params(password: &str, params: &KeyDerivationParams) -> WalletResult<Self> {
        let key = derive_key(password.as_bytes(), params)?;
        Ok(Self {
            cipher: Aes256GcmCipher::new(&key),
        })
    }

    /// Encrypt bytes into sealed Base64 text
    pub fn encrypt(&self, plaintext: &[u8]) -> WalletResult<String> {
        self.cipher.encrypt(plaintext)
    }

    /// Decrypt sealed Base64 text
    pub fn decrypt(&self, sealed: &str) -> WalletResult<SecureBytes> {
        self.cipher.decrypt(sealed)
    }
}

impl std::fmt::Debug for Crypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Crypto { .. }")
    }
}
