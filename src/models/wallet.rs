//! Wallet model
//!
//! The wallet is the in-memory credential store: items keyed by id plus the
//! store-level `timestamp` used to decide which of two wallets is newer.
//! The item map is private; every mutation goes through `add_item`,
//! `edit_item` or `delete_item` so the key of each entry is always the id
//! of the item stored under it.

use std::collections::BTreeMap;

use crate::error::{WalletError, WalletResult};

use super::current_timestamp;
use super::field::Field;
use super::ids::ItemId;
use super::item::Item;

/// A collection of credential items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    /// Seconds since epoch of the last change to the wallet as a whole
    pub timestamp: u64,
    items: BTreeMap<ItemId, Item>,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

impl Wallet {
    /// Create an empty wallet stamped with the current time
    pub fn new() -> Self {
        Self::with_timestamp(current_timestamp())
    }

    /// Create an empty wallet with an explicit timestamp
    pub fn with_timestamp(timestamp: u64) -> Self {
        Self {
            timestamp,
            items: BTreeMap::new(),
        }
    }

    /// Build a wallet from items, rejecting repeated ids
    pub fn from_items(
        timestamp: u64,
        items: impl IntoIterator<Item = Item>,
    ) -> WalletResult<Self> {
        let mut wallet = Self::with_timestamp(timestamp);
        for item in items {
            wallet.insert_new(item)?;
        }
        Ok(wallet)
    }

    /// Build from items whose ids are already known to be distinct,
    /// e.g. items drawn from a single wallet
    pub(crate) fn from_distinct_items(timestamp: u64, items: Vec<Item>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        Self { timestamp, items }
    }

    /// Insert an item under its own id
    ///
    /// Fails with `Duplicate` if the id is taken; use `edit_item` to change an
    /// existing item. The item's `last_edited` is left as is; the wallet
    /// timestamp is updated.
    pub fn add_item(&mut self, item: Item) -> WalletResult<()> {
        self.insert_new(item)?;
        self.update_timestamp();
        Ok(())
    }

    /// Replace name and fields of an existing item
    pub fn edit_item(&mut self, id: &str, name: &str, fields: Vec<Field>) -> WalletResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| WalletError::item_not_found(id))?;
        item.replace(name.to_string(), fields);
        self.update_timestamp();
        Ok(())
    }

    /// Remove an item and return it
    pub fn delete_item(&mut self, id: &str) -> WalletResult<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| WalletError::item_not_found(id))?;
        self.update_timestamp();
        Ok(item)
    }

    /// Add a copy of an existing item under a fresh id, returning the new id
    pub fn duplicate_item(&mut self, id: &str) -> WalletResult<ItemId> {
        let copy = self
            .items
            .get(id)
            .ok_or_else(|| WalletError::item_not_found(id))?
            .duplicate();
        let new_id = copy.id().clone();
        self.add_item(copy)?;
        Ok(new_id)
    }

    /// All item ids
    ///
    /// The order is an implementation detail; only completeness is guaranteed.
    pub fn get_ids(&self) -> Vec<ItemId> {
        self.items.keys().cloned().collect()
    }

    /// Item with the given id
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over all items
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Find an item by exact id, else by unique case-insensitive name
    pub fn find(&self, query: &str) -> WalletResult<&Item> {
        if let Some(item) = self.items.get(query) {
            return Ok(item);
        }

        let query_lower = query.to_lowercase();
        let mut matches = self
            .items
            .values()
            .filter(|item| item.name().to_lowercase() == query_lower);

        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(WalletError::Validation(format!(
                "More than one item is named '{}'; use its id instead",
                query
            ))),
            _ => Err(WalletError::item_not_found(query)),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stamp the wallet with the current time
    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    fn insert_new(&mut self, item: Item) -> WalletResult<()> {
        if self.items.contains_key(item.id()) {
            return Err(WalletError::duplicate_item(item.id().as_str()));
        }
        self.items.insert(item.id().clone(), item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    fn google() -> Item {
        Item::with_fields(
            "Google",
            vec![
                Field::new("Username", "open_user", FieldType::Username, false),
                Field::new("Password", "secret_pa55", FieldType::Password, true),
            ],
        )
    }

    #[test]
    fn test_new_wallet_is_empty() {
        let wallet = Wallet::new();
        assert!(wallet.is_empty());
        assert!(wallet.timestamp > 0);
    }

    #[test]
    fn test_add_item() {
        let mut wallet = Wallet::with_timestamp(1);
        let item = google();
        let id = item.id().clone();

        wallet.add_item(item).unwrap();

        assert_eq!(wallet.len(), 1);
        assert_eq!(wallet.get(id.as_str()).unwrap().name(), "Google");
        assert!(wallet.timestamp > 1);
    }

    #[test]
    fn test_add_item_keeps_last_edited() {
        let mut wallet = Wallet::new();
        let item = Item::restore(ItemId::from("id1"), "Old", Vec::new(), 1493189705);

        wallet.add_item(item).unwrap();

        assert_eq!(wallet.get("id1").unwrap().last_edited(), 1493189705);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut wallet = Wallet::new();
        let item = google();
        let clone = item.clone();

        wallet.add_item(item).unwrap();
        let err = wallet.add_item(clone).unwrap_err();

        assert!(matches!(err, WalletError::Duplicate { .. }));
        assert_eq!(wallet.len(), 1);
    }

    #[test]
    fn test_edit_item() {
        let mut wallet = Wallet::new();
        let mut item = google();
        item.set_last_edited(10);
        let id = item.id().clone();
        wallet.add_item(item).unwrap();
        wallet.timestamp = 10;

        wallet
            .edit_item(
                id.as_str(),
                "Gmail",
                vec![Field::new("Email", "a@b.c", FieldType::Email, false)],
            )
            .unwrap();

        let edited = wallet.get(id.as_str()).unwrap();
        assert_eq!(edited.name(), "Gmail");
        assert_eq!(edited.len(), 1);
        assert!(edited.last_edited() > 10);
        assert!(wallet.timestamp > 10);
    }

    #[test]
    fn test_edit_missing_item() {
        let mut wallet = Wallet::with_timestamp(5);
        let err = wallet.edit_item("missing", "x", Vec::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(wallet.timestamp, 5);
    }

    #[test]
    fn test_delete_item() {
        let mut wallet = Wallet::new();
        let item = google();
        let id = item.id().clone();
        wallet.add_item(item).unwrap();
        wallet.timestamp = 1;

        let removed = wallet.delete_item(id.as_str()).unwrap();

        assert_eq!(removed.name(), "Google");
        assert!(wallet.is_empty());
        assert!(wallet.timestamp > 1);
        assert!(wallet.delete_item(id.as_str()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_item() {
        let mut wallet = Wallet::new();
        let item = google();
        let id = item.id().clone();
        wallet.add_item(item).unwrap();

        let new_id = wallet.duplicate_item(id.as_str()).unwrap();

        assert_ne!(new_id, id);
        assert_eq!(wallet.len(), 2);
        assert_eq!(
            wallet.get(new_id.as_str()).unwrap().fields(),
            wallet.get(id.as_str()).unwrap().fields()
        );
    }

    #[test]
    fn test_get_ids_complete() {
        let mut wallet = Wallet::new();
        let mut expected = Vec::new();
        for name in ["a", "b", "c"] {
            let item = Item::new(name);
            expected.push(item.id().clone());
            wallet.add_item(item).unwrap();
        }

        let mut ids = wallet.get_ids();
        ids.sort();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_keys_match_item_ids() {
        let mut wallet = Wallet::new();
        for name in ["a", "b", "c"] {
            wallet.add_item(Item::new(name)).unwrap();
        }
        for id in wallet.get_ids() {
            assert_eq!(wallet.get(id.as_str()).unwrap().id(), &id);
        }
    }

    #[test]
    fn test_from_items_rejects_repeated_ids() {
        let a = Item::restore(ItemId::from("same"), "a", Vec::new(), 1);
        let b = Item::restore(ItemId::from("same"), "b", Vec::new(), 2);
        assert!(Wallet::from_items(1, vec![a, b]).is_err());
    }

    #[test]
    fn test_find_by_id_and_name() {
        let mut wallet = Wallet::new();
        let item = google();
        let id = item.id().clone();
        wallet.add_item(item).unwrap();

        assert_eq!(wallet.find(id.as_str()).unwrap().id(), &id);
        assert_eq!(wallet.find("google").unwrap().id(), &id);
        assert!(wallet.find("yahoo").unwrap_err().is_not_found());

        wallet.add_item(Item::new("GOOGLE")).unwrap();
        assert!(matches!(
            wallet.find("google").unwrap_err(),
            WalletError::Validation(_)
        ));
    }
}
