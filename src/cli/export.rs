//! CLI commands for data export

use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{WalletError, WalletResult};
use crate::export::export_wallet_csv;

use super::session::Session;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all items to CSV, one row per field (values in clear text)
    Csv {
        /// Output file path (stdout if omitted)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> WalletResult<()> {
    let crypto = session.unlock()?;
    let wallet = session.store().load(&crypto)?;

    match cmd {
        ExportCommands::Csv { output: Some(output) } => {
            let file = File::create(&output).map_err(|e| {
                WalletError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            let rows = export_wallet_csv(&wallet, &mut writer)?;
            writer
                .flush()
                .map_err(|e| WalletError::Export(e.to_string()))?;

            eprintln!("Exported {} row(s) to: {}", rows, output.display());
            eprintln!("Note: the file contains passwords in clear text.");
        }
        ExportCommands::Csv { output: None } => {
            let stdout = io::stdout();
            export_wallet_csv(&wallet, stdout.lock())?;
        }
    }

    Ok(())
}
