//! Custom error types for passwallet
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Cryptographic and parsing failures are always returned as values so the
//! caller can tell a wrong password apart from a damaged file.

use thiserror::Error;

use crate::models::Wallet;

/// The main error type for passwallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The password hash could not be computed; the Crypto instance is unusable
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// The AEAD primitive refused to encrypt
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Integrity check failed: wrong password, tampered or truncated data
    #[error("Wrong password or corrupted data")]
    AuthenticationFailed {
        /// Timestamp of the envelope that could not be opened, if known
        envelope_timestamp: Option<u64>,
    },

    /// Envelope or document is structurally invalid
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl WalletError {
    /// Create a "not found" error for items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for item ids
    pub fn duplicate_item(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Authentication failure with no envelope context
    pub fn authentication_failed() -> Self {
        Self::AuthenticationFailed {
            envelope_timestamp: None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a wrong-password / tampering error
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }

    /// Whether the caller may retry with different input (e.g. another password)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::NotFound { .. } | Self::Duplicate { .. }
        )
    }

    /// The placeholder wallet for an envelope that could not be opened
    ///
    /// Empty, but stamped with the envelope's timestamp so a caller can still
    /// show when the inaccessible wallet was last saved.
    pub fn locked_wallet(&self) -> Option<Wallet> {
        match self {
            Self::AuthenticationFailed {
                envelope_timestamp: Some(timestamp),
            } => Some(Wallet::with_timestamp(*timestamp)),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for passwallet operations
pub type WalletResult<T> = Result<T, WalletError>;
