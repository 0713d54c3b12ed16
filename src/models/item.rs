//! Item model
//!
//! An item is one credential entry: a name plus an ordered list of fields.

use std::fmt;

use super::current_timestamp;
use super::field::Field;
use super::ids::ItemId;

/// A credential entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: String,
    fields: Vec<Field>,
    last_edited: u64,
}

impl Item {
    /// Create an item with no fields under a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_fields(name, Vec::new())
    }

    /// Create an item with fields under a fresh id
    pub fn with_fields(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            fields,
            last_edited: current_timestamp(),
        }
    }

    /// Rebuild an item with a known id and edit time
    ///
    /// Used when reading a document. A `last_edited` of 0 means "unknown" and
    /// is replaced by the current time.
    pub fn restore(
        id: ItemId,
        name: impl Into<String>,
        fields: Vec<Field>,
        last_edited: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            fields,
            last_edited: if last_edited == 0 {
                current_timestamp()
            } else {
                last_edited
            },
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field at `index`, if any
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Seconds since epoch of the last change to name or fields
    pub fn last_edited(&self) -> u64 {
        self.last_edited
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rename the item
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replace all fields
    pub fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
        self.touch();
    }

    /// Append a field
    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
        self.touch();
    }

    /// Replace name and fields in one edit
    pub(crate) fn replace(&mut self, name: String, fields: Vec<Field>) {
        self.name = name;
        self.fields = fields;
        self.touch();
    }

    /// Assign a fresh random id and return it
    pub fn regenerate_id(&mut self) -> &ItemId {
        self.id = ItemId::generate();
        &self.id
    }

    /// Copy of this item under a fresh id
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy
    }

    #[cfg(test)]
    pub(crate) fn set_last_edited(&mut self, last_edited: u64) {
        self.last_edited = last_edited;
    }

    fn touch(&mut self) {
        self.last_edited = current_timestamp();
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    #[test]
    fn test_new_item_has_id() {
        let item = Item::new("test");
        assert!(!item.id().as_str().is_empty());
        assert!(item.last_edited() > 0);
        assert!(item.is_empty());
    }

    #[test]
    fn test_restore_keeps_id_and_time() {
        let item = Item::restore(ItemId::from("id"), "test", Vec::new(), 1493189705);
        assert_eq!(item.id().as_str(), "id");
        assert_eq!(item.last_edited(), 1493189705);
    }

    #[test]
    fn test_restore_with_unknown_time_uses_now() {
        let before = current_timestamp();
        let item = Item::restore(ItemId::from("id"), "test", Vec::new(), 0);
        assert!(item.last_edited() >= before);
    }

    #[test]
    fn test_field_order_preserved() {
        let item = Item::with_fields(
            "Google",
            vec![
                Field::new("Username", "open_user", FieldType::Username, false),
                Field::new("Password", "secret_pa55", FieldType::Password, true),
            ],
        );
        assert_eq!(item.len(), 2);
        assert_eq!(item.field(0).unwrap().name, "Username");
        assert_eq!(item.field(1).unwrap().name, "Password");
        assert!(item.field(2).is_none());
    }

    #[test]
    fn test_mutation_updates_last_edited() {
        let mut item = Item::new("old");
        item.set_last_edited(1);

        item.set_name("new");
        assert!(item.last_edited() > 1);

        item.set_last_edited(1);
        item.push_field(Field::new("Url", "example.com", FieldType::Url, false));
        assert!(item.last_edited() > 1);
        assert_eq!(item.len(), 1);
    }

    #[test]
    fn test_regenerate_id() {
        let mut item = Item::new("test");
        let old = item.id().clone();
        let new = item.regenerate_id().clone();
        assert_ne!(old, new);
        assert_eq!(item.id(), &new);
    }

    #[test]
    fn test_duplicate_changes_only_id() {
        let item = Item::with_fields(
            "Wire",
            vec![Field::new("URL", "wire.com", FieldType::Url, false)],
        );
        let copy = item.duplicate();
        assert_ne!(copy.id(), item.id());
        assert_eq!(copy.name(), item.name());
        assert_eq!(copy.fields(), item.fields());
        assert_eq!(copy.last_edited(), item.last_edited());
    }
}
