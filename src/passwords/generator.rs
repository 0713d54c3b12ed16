//! Random password generation
//!
//! Characters are drawn from the operating system RNG. The requested number
//! of digits, symbols and uppercase letters is placed first, the rest is
//! filled with lowercase letters, and the result is shuffled.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::error::{WalletError, WalletResult};

pub const DIGITS: &str = "0123456789";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_{|}";

/// Longest password the generator will produce
pub const MAX_LENGTH: usize = 1024;

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Total length
    pub length: usize,
    /// Minimum number of digits
    pub digits: usize,
    /// Minimum number of symbols
    pub symbols: usize,
    /// Minimum number of uppercase letters
    pub uppercase: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 20,
            digits: 3,
            symbols: 3,
            uppercase: 3,
        }
    }
}

impl GeneratorConfig {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.length == 0 || self.length > MAX_LENGTH {
            return Err(WalletError::Validation(format!(
                "Password length must be between 1 and {}",
                MAX_LENGTH
            )));
        }
        Ok(())
    }
}

/// Generate a password
///
/// Class counts that exceed `length` are truncated in the order digits,
/// symbols, uppercase.
pub fn generate_password(config: &GeneratorConfig) -> WalletResult<String> {
    config.validate()?;

    let mut chars: Vec<char> = Vec::with_capacity(config.length);
    for (set, wanted) in [
        (DIGITS, config.digits),
        (SYMBOLS, config.symbols),
        (UPPERCASE, config.uppercase),
    ] {
        let room = config.length - chars.len();
        for _ in 0..wanted.min(room) {
            chars.push(pick(set));
        }
    }
    while chars.len() < config.length {
        chars.push(pick(LOWERCASE));
    }

    shuffle(&mut chars);
    Ok(chars.into_iter().collect())
}

fn pick(set: &str) -> char {
    let bytes = set.as_bytes();
    bytes[random_below(bytes.len())] as char
}

fn shuffle(chars: &mut [char]) {
    for i in (1..chars.len()).rev() {
        let j = random_below(i + 1);
        chars.swap(i, j);
    }
}

/// Uniform integer in `0..bound` without modulo bias
fn random_below(bound: usize) -> usize {
    let bound = bound as u64;
    let zone = u64::MAX - (u64::MAX % bound);
    loop {
        let value = OsRng.next_u64();
        if value < zone {
            return (value % bound) as usize;
        }
    }
}
