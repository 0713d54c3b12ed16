//! Wallet serialization
//!
//! `document` converts a wallet to and from its plaintext JSON form;
//! `envelope` wraps that document in the encrypted, versioned file format.

pub mod document;
pub mod envelope;

pub use document::{from_document, to_document};
pub use envelope::{load, load_with, peek_timestamp, save, save_with, Envelope, CURRENT_VERSION};
