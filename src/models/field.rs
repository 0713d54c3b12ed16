//! Item fields
//!
//! A field is one labelled value inside an item: a username, a password, a
//! URL and so on. Fields have no identity; they are addressed by position.

use std::fmt;
use std::str::FromStr;

/// Kind of value stored in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    Username,
    Password,
    Email,
    Url,
    Pin,
    Date,
    Other,
    /// Unknown or missing type
    #[default]
    Undefined,
}

/// The one mapping between field types and their wire names
const FIELD_TYPE_NAMES: [(FieldType, &str); 8] = [
    (FieldType::Username, "username"),
    (FieldType::Password, "password"),
    (FieldType::Email, "email"),
    (FieldType::Url, "url"),
    (FieldType::Pin, "pin"),
    (FieldType::Date, "date"),
    (FieldType::Other, "other"),
    (FieldType::Undefined, "undefined"),
];

impl FieldType {
    /// All field types, in display order
    pub fn all() -> impl Iterator<Item = FieldType> {
        FIELD_TYPE_NAMES.iter().map(|(t, _)| *t)
    }

    /// Lowercase wire name of this type
    pub fn as_str(&self) -> &'static str {
        FIELD_TYPE_NAMES
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, name)| *name)
            .unwrap_or("undefined")
    }

    /// Map a wire name to a type; anything unrecognised is `Undefined`
    pub fn parse(name: &str) -> Self {
        FIELD_TYPE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(t, _)| *t)
            .unwrap_or(FieldType::Undefined)
    }

    /// Whether a UI should mask values of this type by default
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::Pin)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A single labelled value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Display name (e.g. "Username")
    pub name: String,
    /// Stored value
    pub value: String,
    /// Kind of value
    pub field_type: FieldType,
    /// Display hint: mask the value in a UI
    pub sensitive: bool,
}

impl Field {
    /// Create a new field
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        field_type: FieldType,
        sensitive: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            field_type,
            sensitive,
        }
    }
}
