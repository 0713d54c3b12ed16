//! Base64 codec for binary ciphertext
//!
//! Standard alphabet with `=` padding. Decoding is strict: bad characters,
//! bad length or non-canonical padding are rejected instead of truncated.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{WalletError, WalletResult};

/// Encode bytes as padded standard Base64
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard Base64
pub fn decode(text: &str) -> WalletResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| WalletError::InvalidFormat(format!("Invalid Base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"Test"), "VGVzdA==");
        assert_eq!(encode(b"Tes"), "VGVz");
        assert_eq!(encode(b"Te"), "VGU=");
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        for len in 0..bytes.len() {
            let encoded = encode(&bytes[..len]);
            assert_eq!(decode(&encoded).unwrap(), &bytes[..len]);
        }
    }

    #[test]
    fn test_zero_bytes_survive() {
        let bytes = [0u8, 0, 1, 0, 0];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        assert!(decode("VGV*dA==").is_err());
        assert!(decode("VGVzdA-_").is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(decode("VGVzdA=").is_err());
        assert!(decode("VGVzd").is_err());
    }

    #[test]
    fn test_decode_error_is_invalid_format() {
        let err = decode("!!!").unwrap_err();
        assert!(matches!(err, WalletError::InvalidFormat(_)));
    }
}
