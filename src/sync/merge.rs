//! Two-way wallet merge
//!
//! Last-writer-wins at two granularities:
//! 1. The wallet with the larger `timestamp` is "newer" (ties: the first
//!    argument). Its id set is the id set of the result.
//! 2. For ids present in both wallets, the item with the larger
//!    `last_edited` wins (ties: the first argument), independent of which
//!    wallet is newer.
//!
//! Ids found only in the older wallet are dropped. There are no tombstones,
//! so "deleted on the newer side" and "never synced to the newer side" look
//! the same, and an item deleted on the older side comes back if the newer
//! side still has it.

use tracing::debug;

use crate::models::{ItemId, Wallet};

/// What a merge did, by item id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Timestamp of the wallet chosen as newer
    pub newer_timestamp: u64,
    /// True if the second argument was the newer wallet
    pub second_was_newer: bool,
    /// Present only in the newer wallet; carried over unchanged
    pub only_in_newer: Vec<ItemId>,
    /// Present in both; the older wallet's copy won on `last_edited`
    pub taken_from_older: Vec<ItemId>,
    /// Present in both; the newer wallet's copy won on `last_edited`
    pub taken_from_newer: Vec<ItemId>,
    /// Present only in the older wallet; left out of the result
    pub dropped: Vec<ItemId>,
}

impl MergeSummary {
    /// Total number of items in the merged wallet
    pub fn merged_count(&self) -> usize {
        self.only_in_newer.len() + self.taken_from_older.len() + self.taken_from_newer.len()
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} item(s): {} kept from newer wallet only, {} updated from older wallet, {} unchanged, {} dropped",
            self.merged_count(),
            self.only_in_newer.len(),
            self.taken_from_older.len(),
            self.taken_from_newer.len(),
            self.dropped.len()
        )
    }
}

/// Merge two wallets into a new one
pub fn merge(a: &Wallet, b: &Wallet) -> Wallet {
    merge_with_summary(a, b).0
}

/// Merge two wallets and report where each item came from
pub fn merge_with_summary(a: &Wallet, b: &Wallet) -> (Wallet, MergeSummary) {
    let second_was_newer = b.timestamp > a.timestamp;
    let (newer, older) = if second_was_newer { (b, a) } else { (a, b) };

    let mut summary = MergeSummary {
        newer_timestamp: newer.timestamp,
        second_was_newer,
        ..Default::default()
    };

    let mut items = Vec::with_capacity(newer.len());
    for newer_item in newer.items() {
        let id = newer_item.id();
        let chosen = match older.get(id.as_str()) {
            None => {
                summary.only_in_newer.push(id.clone());
                newer_item
            }
            Some(older_item) => {
                // The argument order decides item ties, not newer/older.
                let (first, second) = if second_was_newer {
                    (older_item, newer_item)
                } else {
                    (newer_item, older_item)
                };
                let winner = if first.last_edited() >= second.last_edited() {
                    first
                } else {
                    second
                };
                if std::ptr::eq(winner, older_item) && winner != newer_item {
                    summary.taken_from_older.push(id.clone());
                } else {
                    summary.taken_from_newer.push(id.clone());
                }
                winner
            }
        };
        items.push(chosen.clone());
    }

    summary.dropped = older
        .items()
        .filter(|item| !newer.contains(item.id().as_str()))
        .map(|item| item.id().clone())
        .collect();

    let merged = Wallet::from_distinct_items(a.timestamp.max(b.timestamp), items);

    debug!(
        newer_timestamp = summary.newer_timestamp,
        merged = summary.merged_count(),
        dropped = summary.dropped.len(),
        "merged wallets"
    );

    (merged, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, FieldType, Item};
    use std::collections::BTreeSet;

    fn item(id: &str, name: &str, last_edited: u64) -> Item {
        Item::restore(
            ItemId::from(id),
            name,
            vec![
                Field::new("Username", "open_user", FieldType::Username, false),
                Field::new("Password", "secret_pa55", FieldType::Password, true),
            ],
            last_edited,
        )
    }

    fn wallet(timestamp: u64, items: Vec<Item>) -> Wallet {
        Wallet::from_items(timestamp, items).unwrap()
    }

    fn ids(wallet: &Wallet) -> BTreeSet<String> {
        wallet.get_ids().into_iter().map(|id| id.to_string()).collect()
    }

    /// Two-item wallet plus a copy with id1 edited 10 seconds later
    fn scenario() -> (Wallet, Wallet) {
        let a = wallet(
            1493189805,
            vec![
                item("id1", "Google", 1493189705),
                item("id2", "Firefox", 1493189705),
            ],
        );
        let mut b = a.clone();
        let mut edited = b.delete_item("id1").unwrap();
        edited.set_last_edited(1493189715);
        b.add_item(edited).unwrap();
        b.timestamp = 1493189815;
        (a, b)
    }

    #[test]
    fn test_merge_idempotent() {
        let (a, _) = scenario();
        assert_eq!(merge(&a, &a), a);

        let empty = Wallet::with_timestamp(7);
        assert_eq!(merge(&empty, &empty), empty);
    }

    #[test]
    fn test_newer_item_wins() {
        let (a, b) = scenario();
        let merged = merge(&a, &b);
        assert_eq!(
            merged.get("id1").unwrap().last_edited(),
            a.get("id1").unwrap().last_edited() + 10
        );
        assert_eq!(merged.timestamp, 1493189815);
    }

    #[test]
    fn test_argument_order_does_not_change_winner() {
        let (a, b) = scenario();
        assert_eq!(merge(&a, &b), merge(&b, &a));
    }

    #[test]
    fn test_item_timestamp_beats_wallet_timestamp() {
        // Newer wallet holds the older copy of the shared item.
        let a = wallet(100, vec![item("x", "from-a", 90)]);
        let b = wallet(200, vec![item("x", "from-b", 50)]);

        let merged = merge(&a, &b);
        assert_eq!(merged.get("x").unwrap().name(), "from-a");

        let merged = merge(&b, &a);
        assert_eq!(merged.get("x").unwrap().name(), "from-a");
    }

    #[test]
    fn test_deleted_in_newer_is_dropped() {
        let (a, mut b) = scenario();
        b.delete_item("id2").unwrap();
        b.timestamp = 1493189900;

        let merged = merge(&a, &b);
        assert_eq!(ids(&merged), BTreeSet::from(["id1".to_string()]));
    }

    #[test]
    fn test_deleted_in_older_resurrects() {
        let (mut a, b) = scenario();
        a.delete_item("id2").unwrap();
        a.timestamp = 1493189800;

        let merged = merge(&a, &b);
        assert!(merged.contains("id2"));
    }

    #[test]
    fn test_membership_subset_of_newer() {
        let a = wallet(10, vec![item("a1", "a", 1), item("shared", "s", 5)]);
        let b = wallet(20, vec![item("b1", "b", 1), item("shared", "s", 6)]);

        for (x, y) in [(&a, &b), (&b, &a)] {
            let merged = merge(x, y);
            assert!(ids(&merged).is_subset(&ids(&b)));
            assert_eq!(ids(&merged), ids(&b));
        }
    }

    #[test]
    fn test_wallet_tie_prefers_first() {
        let a = wallet(10, vec![item("a1", "a", 1)]);
        let b = wallet(10, vec![item("b1", "b", 1)]);

        assert_eq!(ids(&merge(&a, &b)), ids(&a));
        assert_eq!(ids(&merge(&b, &a)), ids(&b));
    }

    #[test]
    fn test_item_tie_prefers_first() {
        let a = wallet(10, vec![item("x", "from-a", 5)]);
        let b = wallet(20, vec![item("x", "from-b", 5)]);

        assert_eq!(merge(&a, &b).get("x").unwrap().name(), "from-a");
        assert_eq!(merge(&b, &a).get("x").unwrap().name(), "from-b");
    }

    #[test]
    fn test_summary() {
        let a = wallet(
            10,
            vec![item("old-only", "o", 1), item("shared", "s", 9), item("same", "x", 1)],
        );
        let b = wallet(
            20,
            vec![item("new-only", "n", 1), item("shared", "s", 3), item("same", "x", 1)],
        );

        let (merged, summary) = merge_with_summary(&a, &b);

        assert!(summary.second_was_newer);
        assert_eq!(summary.newer_timestamp, 20);
        assert_eq!(summary.only_in_newer, vec![ItemId::from("new-only")]);
        assert_eq!(summary.taken_from_older, vec![ItemId::from("shared")]);
        assert_eq!(summary.taken_from_newer, vec![ItemId::from("same")]);
        assert_eq!(summary.dropped, vec![ItemId::from("old-only")]);
        assert_eq!(summary.merged_count(), merged.len());
        assert!(summary.summary().contains("1 dropped"));
    }
}
