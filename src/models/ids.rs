//! Item identifiers
//!
//! Ids are opaque strings. New ids are random v4 UUIDs in simple (hex) form,
//! which are safe in JSON keys, URLs and file names. Ids read back from a
//! document are kept verbatim, whatever their shape.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Identifier of an item within a wallet
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a new random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing id string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for display
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_id_shape() {
        let id = ItemId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_unique() {
        let ids: HashSet<ItemId> = (0..100_000).map(|_| ItemId::generate()).collect();
        assert_eq!(ids.len(), 100_000);
    }

    #[test]
    fn test_explicit_id_kept_verbatim() {
        let id = ItemId::from_string("id1");
        assert_eq!(id.as_str(), "id1");
        assert_eq!(id.to_string(), "id1");
    }

    #[test]
    fn test_short() {
        assert_eq!(ItemId::from("0123456789abcdef").short(), "01234567");
        assert_eq!(ItemId::from("id1").short(), "id1");
    }

    #[test]
    fn test_id_serialization() {
        let id = ItemId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let deserialized: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
