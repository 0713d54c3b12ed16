//! Storage layer for passwallet
//!
//! Atomic file writes plus `VaultStore`, which reads and writes the
//! encrypted wallet file.

pub mod file_io;
pub mod vault;

pub use file_io::{read_json, read_to_string, write_atomic, write_json_atomic};
pub use vault::VaultStore;
