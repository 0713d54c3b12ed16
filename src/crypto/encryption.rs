//! AES-256-GCM authenticated encryption
//!
//! Sealed output is `nonce || ciphertext || tag`, Base64-encoded so it can be
//! embedded in JSON. Every call draws a fresh 96-bit nonce from the OS RNG.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use crate::error::{WalletError, WalletResult};

use super::codec;
use super::secure_memory::SecureBytes;
use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Authenticated encryption of byte strings into text
pub trait AeadCipher {
    /// Encrypt `plaintext` under a fresh random nonce
    fn encrypt(&self, plaintext: &[u8]) -> WalletResult<String>;

    /// Decrypt and authenticate a value produced by [`AeadCipher::encrypt`]
    ///
    /// Any failure (bad Base64, truncated input, wrong key, tampering) is
    /// `AuthenticationFailed`; no unauthenticated bytes are ever returned.
    fn decrypt(&self, sealed: &str) -> WalletResult<SecureBytes>;
}

/// AES-256-GCM implementation of [`AeadCipher`]
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl Aes256GcmCipher {
    /// Create a cipher bound to a derived key
    pub fn new(key: &DerivedKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }
}

impl AeadCipher for Aes256GcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> WalletResult<String> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| WalletError::Encryption(format!("Encryption failed: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(codec::encode(&sealed))
    }

    fn decrypt(&self, sealed: &str) -> WalletResult<SecureBytes> {
        let sealed = codec::decode(sealed).map_err(|_| WalletError::authentication_failed())?;

        if sealed.len() < NONCE_SIZE + TAG_SIZE {
            return Err(WalletError::authentication_failed());
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| WalletError::authentication_failed())?;

        Ok(SecureBytes::new(plaintext))
    }
}
