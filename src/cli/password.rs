//! Password utility commands
//!
//! Neither command touches the wallet.

use clap::{Args, Subcommand};

use crate::error::WalletResult;
use crate::passwords::{
    generate_password, password_strength, password_strength_category, GeneratorConfig,
};

use super::session::prompt_password;

/// Generator options shared by `password generate` and `item add --generate`
#[derive(Args, Debug, Clone, Copy)]
pub struct GeneratorArgs {
    /// Password length
    #[arg(long, default_value_t = 20)]
    pub length: usize,
    /// Number of digits
    #[arg(long, default_value_t = 3)]
    pub digits: usize,
    /// Number of symbols
    #[arg(long, default_value_t = 3)]
    pub symbols: usize,
    /// Number of uppercase letters
    #[arg(long, default_value_t = 3)]
    pub uppercase: usize,
}

impl From<GeneratorArgs> for GeneratorConfig {
    fn from(args: GeneratorArgs) -> Self {
        Self {
            length: args.length,
            digits: args.digits,
            symbols: args.symbols,
            uppercase: args.uppercase,
        }
    }
}

/// Password subcommands
#[derive(Subcommand, Debug)]
pub enum PasswordCommands {
    /// Print a random password
    Generate {
        #[command(flatten)]
        options: GeneratorArgs,
    },
    /// Rate a password (read from a hidden prompt)
    Check,
}

/// Handle a password command
pub fn handle_password_command(cmd: PasswordCommands) -> WalletResult<()> {
    match cmd {
        PasswordCommands::Generate { options } => {
            let password = generate_password(&options.into())?;
            println!("{}", password);
            eprintln!("Strength: {}", password_strength_category(&password));
        }

        PasswordCommands::Check => {
            let password = prompt_password("Password to check: ")?;
            println!(
                "Strength: {} (score {:.1})",
                password_strength_category(password.as_str()),
                password_strength(password.as_str())
            );
        }
    }

    Ok(())
}
