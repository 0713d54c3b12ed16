//! Persisted, encrypted wallet envelope
//!
//! ```json
//! {"version": 0, "timestamp": 1493189805, "data": "<base64 nonce || ciphertext || tag>"}
//! ```
//!
//! All three keys are required. The envelope timestamp is authoritative: a
//! loaded wallet always carries it, whatever the inner document says.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::crypto::Crypto;
use crate::error::{WalletError, WalletResult};
use crate::models::Wallet;

use super::document::{from_document, to_document};

/// Envelope format version written by this crate
pub const CURRENT_VERSION: u32 = 0;

/// The on-disk wrapper around an encrypted wallet document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub timestamp: u64,
    pub data: String,
}

impl Envelope {
    /// Parse envelope text and check its version
    pub fn parse(text: &str) -> WalletResult<Self> {
        let envelope: Envelope = serde_json::from_str(text)
            .map_err(|e| WalletError::InvalidFormat(format!("Invalid wallet envelope: {}", e)))?;

        if envelope.version > CURRENT_VERSION {
            return Err(WalletError::InvalidFormat(format!(
                "Unsupported envelope version {} (newest known is {})",
                envelope.version, CURRENT_VERSION
            )));
        }

        Ok(envelope)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> WalletResult<String> {
        serde_json::to_string_pretty(self).map_err(WalletError::from)
    }
}

/// Encrypt a wallet under `password`
pub fn save(wallet: &Wallet, password: &str) -> WalletResult<String> {
    save_with(wallet, &Crypto::new(password)?)
}

/// Encrypt a wallet with an already derived key
pub fn save_with(wallet: &Wallet, crypto: &Crypto) -> WalletResult<String> {
    let document = to_document(wallet)?;
    let data = crypto.encrypt(document.as_bytes())?;

    let envelope = Envelope {
        version: CURRENT_VERSION,
        timestamp: wallet.timestamp,
        data,
    };

    debug!(
        timestamp = envelope.timestamp,
        items = wallet.len(),
        "sealed wallet envelope"
    );
    envelope.to_json()
}

/// Decrypt an envelope with `password`
///
/// A wrong password or damaged ciphertext yields `AuthenticationFailed`
/// carrying the envelope timestamp; see `WalletError::locked_wallet`.
pub fn load(text: &str, password: &str) -> WalletResult<Wallet> {
    // Parse first so a malformed file is reported without paying for the KDF.
    Envelope::parse(text)?;
    load_with(text, &Crypto::new(password)?)
}

/// Decrypt an envelope with an already derived key
pub fn load_with(text: &str, crypto: &Crypto) -> WalletResult<Wallet> {
    let envelope = Envelope::parse(text)?;

    let plaintext = crypto.decrypt(&envelope.data).map_err(|e| {
        if e.is_authentication_failure() {
            warn!(
                timestamp = envelope.timestamp,
                "could not open wallet envelope"
            );
            WalletError::AuthenticationFailed {
                envelope_timestamp: Some(envelope.timestamp),
            }
        } else {
            e
        }
    })?;

    let document = plaintext.as_utf8().map_err(|e| {
        WalletError::InvalidFormat(format!("Decrypted wallet document is not UTF-8: {}", e))
    })?;

    let mut wallet = from_document(document)?;
    wallet.timestamp = envelope.timestamp;

    debug!(
        timestamp = wallet.timestamp,
        items = wallet.len(),
        "opened wallet envelope"
    );
    Ok(wallet)
}

/// Read the envelope timestamp without decrypting
pub fn peek_timestamp(text: &str) -> WalletResult<u64> {
    Envelope::parse(text).map(|envelope| envelope.timestamp)
}
