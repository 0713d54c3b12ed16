//! Export module for passwallet
//!
//! Exports decrypted wallet contents for use outside passwallet:
//! - CSV: one row per field (spreadsheet-compatible)

pub mod csv;

pub use self::csv::{export_wallet_csv, CSV_HEADER};
