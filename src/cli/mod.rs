//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the wallet and storage layers.

pub mod backup;
pub mod export;
pub mod item;
pub mod password;
pub mod session;
pub mod vault;

pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportCommands};
pub use item::{handle_item_command, ItemCommands};
pub use password::{handle_password_command, PasswordCommands};
pub use session::{Session, PASSWORD_ENV};
pub use vault::{handle_config, handle_init, handle_merge, handle_status};
