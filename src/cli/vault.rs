//! Wallet-level CLI commands: init, status, config and merge

use std::path::Path;

use crate::backup::BackupManager;
use crate::error::{WalletError, WalletResult};
use crate::serialization::load_with;
use crate::storage::file_io::read_to_string;
use crate::sync::merge_with_summary;

use super::session::Session;

/// Create the settings file and an empty wallet
pub fn handle_init(session: &Session) -> WalletResult<()> {
    let store = session.store();
    if store.exists() {
        return Err(WalletError::Duplicate {
            entity_type: "Wallet",
            identifier: store.wallet_file().display().to_string(),
        });
    }

    println!("Initializing passwallet at: {}", session.paths().base_dir().display());
    let crypto = session.unlock_new()?;

    session.paths().ensure_directories()?;
    if !session.paths().settings_file().exists() {
        session.settings().save(session.paths())?;
    }
    store.create(&crypto)?;

    println!("Wallet created: {}", store.wallet_file().display());
    println!();
    println!("Add your first item with:");
    println!("  passwallet item add <name> --field username:Username=<user> --field password:Password=<secret>");
    Ok(())
}

/// Show where the wallet lives and when it was last saved
///
/// Needs no password.
pub fn handle_status(session: &Session) -> WalletResult<()> {
    let store = session.store();
    let settings = session.settings();

    println!("passwallet status");
    println!("=================");
    println!("Wallet file: {}", store.wallet_file().display());

    if !store.exists() {
        println!("Wallet:      not initialized (run 'passwallet init')");
        return Ok(());
    }

    match store.peek_timestamp() {
        Ok(timestamp) => println!("Last saved:  {}", settings.format_timestamp(timestamp)),
        Err(e) => println!("Last saved:  unreadable ({})", e),
    }

    let manager = BackupManager::new(session.paths().clone(), settings.backup_retention.clone());
    let backups = manager.list_backups()?;
    match backups.first() {
        Some(latest) => println!(
            "Backups:     {} (latest {})",
            backups.len(),
            latest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Backups:     none"),
    }

    Ok(())
}

/// Print paths and settings
pub fn handle_config(session: &Session) -> WalletResult<()> {
    let paths = session.paths();
    let settings = session.settings();

    println!("passwallet configuration");
    println!("========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Wallet file:      {}", paths.wallet_file().display());
    println!("Backup directory: {}", paths.backup_dir().display());
    println!();
    println!("Settings:");
    println!("  Auto backup:      {}", settings.auto_backup);
    println!("  Backups kept:     {}", settings.backup_retention.keep_count);
    println!("  Mask sensitive:   {}", settings.mask_sensitive);
    println!("  Date format:      {}", settings.date_format);
    Ok(())
}

/// Merge another wallet file into the local wallet
///
/// Both files must open with the same password.
pub fn handle_merge(session: &Session, other: &Path, dry_run: bool) -> WalletResult<()> {
    let store = session.store();
    let crypto = session.unlock()?;

    let local = store.load(&crypto)?;
    let remote = load_with(&read_to_string(other)?, &crypto)?;

    let (merged, summary) = merge_with_summary(&local, &remote);

    println!("Merging {}", other.display());
    println!(
        "Newer wallet: {} (saved {})",
        if summary.second_was_newer { "other" } else { "local" },
        session.settings().format_timestamp(summary.newer_timestamp)
    );
    println!("{}", summary.summary());

    if !summary.dropped.is_empty() {
        println!();
        println!("Not in the newer wallet, left out:");
        for id in &summary.dropped {
            if let Some(item) = local.get(id.as_str()).or_else(|| remote.get(id.as_str())) {
                println!("  {}", item);
            }
        }
    }

    if dry_run {
        println!();
        println!("Dry run: local wallet not changed.");
        return Ok(());
    }

    if merged == local {
        println!("Local wallet already up to date.");
        return Ok(());
    }

    store.save(&merged, &crypto)?;
    println!("Local wallet updated.");
    Ok(())
}
