//! Password generation and strength estimates
//!
//! Used by the CLI when adding items and by `passwallet password`.

pub mod generator;
pub mod strength;

pub use generator::{generate_password, GeneratorConfig};
pub use strength::{password_strength, password_strength_category, StrengthCategory};
