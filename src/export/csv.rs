//! CSV export
//!
//! One row per field. Items without fields get a single row with the field
//! columns left empty, so every item appears in the export.

use std::io::Write;

use crate::error::{WalletError, WalletResult};
use crate::models::{Item, Wallet};

/// Column names, in order
pub const CSV_HEADER: [&str; 7] = [
    "item_id",
    "item_name",
    "last_edited",
    "field_name",
    "field_type",
    "value",
    "sensitive",
];

/// Write every item of `wallet` as CSV, returning the number of data rows
///
/// Items are ordered by name, then id. Values are written in clear text.
pub fn export_wallet_csv<W: Write>(wallet: &Wallet, writer: W) -> WalletResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER).map_err(export_error)?;

    let mut items: Vec<&Item> = wallet.items().collect();
    items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));

    let mut rows = 0;
    for item in items {
        let last_edited = item.last_edited().to_string();

        if item.is_empty() {
            csv_writer
                .write_record([item.id().as_str(), item.name(), &last_edited, "", "", "", ""])
                .map_err(export_error)?;
            rows += 1;
            continue;
        }

        for field in item.fields() {
            csv_writer
                .write_record([
                    item.id().as_str(),
                    item.name(),
                    &last_edited,
                    &field.name,
                    field.field_type.as_str(),
                    &field.value,
                    if field.sensitive { "true" } else { "false" },
                ])
                .map_err(export_error)?;
            rows += 1;
        }
    }

    csv_writer.flush().map_err(|e| WalletError::Export(e.to_string()))?;
    Ok(rows)
}

fn export_error(err: csv::Error) -> WalletError {
    WalletError::Export(err.to_string())
}
