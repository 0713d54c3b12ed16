use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use passwallet::cli::{
    handle_backup_command, handle_config, handle_export_command, handle_init,
    handle_item_command, handle_merge, handle_password_command, handle_status, Session,
};
use passwallet::config::{paths::WalletPaths, settings::Settings};
use passwallet::crypto::SecureString;

#[derive(Parser)]
#[command(
    name = "passwallet",
    version,
    about = "Offline encrypted password wallet",
    long_about = "passwallet keeps credentials in a single AES-256-GCM encrypted file \
                  keyed by an Argon2id derivation of your password, and can merge \
                  two copies of the wallet that were edited apart."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Wallet password (prompted for if not given)
    #[arg(long, env = "PASSWALLET_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty wallet
    Init,

    /// Show wallet location and last save time (no password needed)
    Status,

    /// Show current configuration and paths
    Config,

    /// Item management commands
    #[command(subcommand)]
    Item(passwallet::cli::ItemCommands),

    /// Merge another copy of the wallet into this one
    Merge {
        /// Path to the other wallet file
        other: PathBuf,
        /// Show what would change without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Export commands
    #[command(subcommand)]
    Export(passwallet::cli::ExportCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(passwallet::cli::BackupCommands),

    /// Generate or rate passwords
    #[command(subcommand)]
    Password(passwallet::cli::PasswordCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Moved, not copied, into zeroizing storage. The argv/environment bytes
    // clap parsed from stay outside our control.
    let password = cli.password.map(SecureString::from);

    let paths = WalletPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let session = Session::new(paths, settings, password);

    match cli.command {
        Some(Commands::Init) => handle_init(&session)?,
        Some(Commands::Status) => handle_status(&session)?,
        Some(Commands::Config) => handle_config(&session)?,
        Some(Commands::Item(cmd)) => handle_item_command(&session, cmd)?,
        Some(Commands::Merge { other, dry_run }) => handle_merge(&session, &other, dry_run)?,
        Some(Commands::Export(cmd)) => handle_export_command(&session, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&session, cmd)?,
        Some(Commands::Password(cmd)) => handle_password_command(cmd)?,
        None => {
            println!("passwallet - offline encrypted password wallet");
            println!();
            println!("Run 'passwallet --help' for usage information.");
            println!("Run 'passwallet init' to create a wallet.");
        }
    }

    Ok(())
}
