//! Wallet synchronization
//!
//! Reconciles two independently edited copies of a wallet. Transport is the
//! caller's concern; this module only merges two snapshots.

pub mod merge;

pub use merge::{merge, merge_with_summary, MergeSummary};
