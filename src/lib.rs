//! passwallet - offline encrypted credential store
//!
//! Credentials are kept as items (a name plus ordered typed fields) in a
//! wallet, persisted as a single JSON envelope whose payload is AES-256-GCM
//! encrypted under an Argon2id key derived from the user's password. Two
//! copies of a wallet edited independently can be merged with
//! last-writer-wins rules.
//!
//! # Architecture
//!
//! - `crypto`: key derivation, AEAD, Base64 codec, zeroizing buffers
//! - `models`: wallets, items, fields and ids
//! - `sync`: two-way wallet merge
//! - `serialization`: plaintext document and encrypted envelope
//! - `config`: paths and user settings
//! - `storage`: atomic file I/O and the wallet file
//! - `backup`: rolling copies of the wallet file
//! - `passwords`: password generator and strength estimate
//! - `export`, `display`, `cli`: user-facing output and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use passwallet::models::{Field, FieldType, Item, Wallet};
//! use passwallet::serialization::{load, save};
//!
//! let mut wallet = Wallet::new();
//! wallet.add_item(Item::with_fields(
//!     "Google",
//!     vec![Field::new("Password", "secret_pa55", FieldType::Password, true)],
//! ))?;
//!
//! let text = save(&wallet, "correct horse")?;
//! assert_eq!(load(&text, "correct horse")?, wallet);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod passwords;
pub mod serialization;
pub mod storage;
pub mod sync;

pub use error::{WalletError, WalletResult};
