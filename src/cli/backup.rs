//! Backup CLI commands
//!
//! Implements CLI commands for backup management. None of them need the
//! wallet password: backups are copies of the encrypted file.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::error::{WalletError, WalletResult};

use super::session::Session;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show created time, wallet save time and size per backup
        #[arg(short = 'l', long)]
        detailed: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(session: &Session, cmd: BackupCommands) -> WalletResult<()> {
    let settings = session.settings();
    let manager = BackupManager::new(session.paths().clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", display_name(&backup_path));
            println!("Location: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Removed {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List { detailed } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: passwallet backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let saved = backup
                    .wallet_timestamp
                    .map(|ts| settings.format_timestamp(ts))
                    .unwrap_or_else(|| "unreadable".to_string());

                if detailed {
                    println!(
                        "{}. {}\n   Created: {}\n   Wallet saved: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        saved,
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;

            if !force {
                println!("Backup: {}", backup_path.display());
                println!();
                println!("WARNING: This will replace the current wallet file!");
                println!("To proceed, run again with --force flag:");
                println!("  passwallet backup restore {} --force", backup);
                return Ok(());
            }

            let result = manager.restore(&backup_path)?;

            println!("Restored wallet from: {}", display_name(&result.restored_from));
            println!(
                "Wallet saved: {}",
                settings.format_timestamp(result.wallet_timestamp)
            );
            if let Some(safety) = result.safety_backup {
                println!("Previous wallet saved as: {}", display_name(&safety));
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> WalletResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| WalletError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    if let Some(info) = manager.get_backup(backup)? {
        return Ok(info.path);
    }

    if let Some(info) = manager.get_backup(&format!("{}.json", backup))? {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    Err(WalletError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(5)), "5s");
        assert_eq!(format_duration(chrono::Duration::minutes(90)), "1h");
        assert_eq!(format_duration(chrono::Duration::days(65)), "2mo");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
