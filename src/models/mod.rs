//! Core data models for passwallet
//!
//! This module contains the credential data model: wallets, items, fields
//! and item identifiers.

pub mod field;
pub mod ids;
pub mod item;
pub mod wallet;

pub use field::{Field, FieldType};
pub use ids::ItemId;
pub use item::Item;
pub use wallet::Wallet;

use chrono::Utc;

/// Current time in whole seconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
