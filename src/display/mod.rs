//! Display formatting for terminal output
//!
//! Formats wallets and items as plain-text tables and detail views.

pub mod item;

pub use item::{format_item_details, format_item_list, mask_value, MASK};
