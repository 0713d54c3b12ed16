//! Password strength estimate
//!
//! The score grows by one for every character and every distinct character
//! beyond the first six, and shrinks when the mix of digits, lowercase,
//! uppercase and symbols is far from their share of the full alphabet.

use std::collections::HashSet;
use std::fmt;

use super::generator::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};

const FREE_CHARACTERS: usize = 6;
const DISTRIBUTION_WEIGHT: f64 = 0.25;

/// Strength bucket for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthCategory {
    Terrible,
    Bad,
    Moderate,
    Good,
    VeryStrong,
}

impl StrengthCategory {
    pub fn from_score(score: f64) -> Self {
        if score < 12.5 {
            Self::Terrible
        } else if score < 14.0 {
            Self::Bad
        } else if score < 17.5 {
            Self::Moderate
        } else if score < 18.0 {
            Self::Good
        } else {
            Self::VeryStrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terrible => "terrible",
            Self::Bad => "bad",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score a password; higher is stronger, never negative
pub fn password_strength(password: &str) -> f64 {
    let length = password.chars().count();
    if length == 0 {
        return 0.0;
    }

    let distinct: HashSet<char> = password.chars().collect();
    let base = (length + distinct.len()).saturating_sub(FREE_CHARACTERS) as f64;

    let alphabet = (DIGITS.len() + LOWERCASE.len() + UPPERCASE.len() + SYMBOLS.len()) as f64;
    let deviation: f64 = [DIGITS, LOWERCASE, UPPERCASE, SYMBOLS]
        .iter()
        .map(|set| {
            let expected = set.len() as f64 / alphabet;
            let actual =
                password.chars().filter(|c| set.contains(*c)).count() as f64 / length as f64;
            (expected - actual).abs()
        })
        .sum();

    (base - DISTRIBUTION_WEIGHT * deviation).max(0.0)
}

pub fn password_strength_category(password: &str) -> StrengthCategory {
    StrengthCategory::from_score(password_strength(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_categories() {
        let samples = [
            ("neki", StrengthCategory::Terrible),
            ("lineageosas", StrengthCategory::Bad),
            ("lineageosas101", StrengthCategory::Good),
            ("lineageosasasd", StrengthCategory::Moderate),
            ("asdfasdfasdf101", StrengthCategory::Moderate),
            ("danesjelepdan123", StrengthCategory::VeryStrong),
            ("danesjelepdanasd", StrengthCategory::Good),
            (":L0^O[=X%O89", StrengthCategory::Moderate),
            ("0y)T2ALv&Rdg:cP;]bx0", StrengthCategory::VeryStrong),
        ];

        for (password, expected) in samples {
            assert_eq!(password_strength_category(password), expected, "{}", password);
        }
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(password_strength(""), 0.0);
        assert_eq!(password_strength_category(""), StrengthCategory::Terrible);
    }

    #[test]
    fn test_repetition_is_weaker() {
        assert!(password_strength("aaaaaaaaaaaa") < password_strength("abcdefghijkl"));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(StrengthCategory::VeryStrong.to_string(), "very strong");
        assert_eq!(StrengthCategory::Terrible.as_str(), "terrible");
    }
}
