//! Item display formatting
//!
//! Formats items for terminal output in table and detail views. Values of
//! sensitive fields are masked unless the caller asks for them in clear.

use crate::config::settings::Settings;
use crate::models::{Field, Item};

/// Replacement shown for masked values
pub const MASK: &str = "********";

/// The value to show for a field
pub fn mask_value(field: &Field, reveal: bool) -> &str {
    if field.sensitive && !reveal {
        MASK
    } else {
        &field.value
    }
}

/// Format a list of items as a table
pub fn format_item_list(items: &[&Item], settings: &Settings) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }

    let name_width = items
        .iter()
        .map(|i| i.name().chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>6}  {}\n",
        "ID",
        "Name",
        "Fields",
        "Last Edited",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<8}  {:-<name_width$}  {:->6}  {:-<19}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for item in items {
        output.push_str(&format!(
            "{:<8}  {:<name_width$}  {:>6}  {}\n",
            item.id().short(),
            item.name(),
            item.len(),
            settings.format_timestamp(item.last_edited()),
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} item(s)\n", items.len()));
    output
}

/// Format a single item's details
pub fn format_item_details(item: &Item, settings: &Settings, reveal: bool) -> String {
    let reveal = reveal || !settings.mask_sensitive;
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", item.name()));
    output.push_str(&format!("  ID:          {}\n", item.id()));
    output.push_str(&format!(
        "  Last Edited: {}\n",
        settings.format_timestamp(item.last_edited())
    ));

    if item.is_empty() {
        output.push_str("\n  (no fields)\n");
        return output;
    }

    let name_width = item
        .fields()
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    output.push('\n');
    for (index, field) in item.fields().iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<name_width$}  [{}]  {}\n",
            index + 1,
            field.name,
            field.field_type,
            mask_value(field, reveal),
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldType, ItemId};

    fn google() -> Item {
        Item::restore(
            ItemId::from("0123456789abcdef"),
            "Google",
            vec![
                Field::new("Username", "open_user", FieldType::Username, false),
                Field::new("Password", "secret_pa55", FieldType::Password, true),
            ],
            1493189705,
        )
    }

    #[test]
    fn test_format_item_list() {
        let item = google();
        let output = format_item_list(&[&item], &Settings::default());

        assert!(output.contains("Google"));
        assert!(output.contains("01234567"));
        assert!(output.contains("2017-04-26 06:55:05"));
        assert!(output.contains("1 item(s)"));
        assert!(!output.contains("secret_pa55"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_item_list(&[], &Settings::default()), "No items found.");
    }

    #[test]
    fn test_details_mask_sensitive() {
        let output = format_item_details(&google(), &Settings::default(), false);

        assert!(output.contains("open_user"));
        assert!(output.contains(MASK));
        assert!(!output.contains("secret_pa55"));
    }

    #[test]
    fn test_details_reveal() {
        let output = format_item_details(&google(), &Settings::default(), true);
        assert!(output.contains("secret_pa55"));

        let settings = Settings {
            mask_sensitive: false,
            ..Settings::default()
        };
        let output = format_item_details(&google(), &settings, false);
        assert!(output.contains("secret_pa55"));
    }

    #[test]
    fn test_details_without_fields() {
        let item = Item::new("Empty");
        let output = format_item_details(&item, &Settings::default(), false);
        assert!(output.contains("(no fields)"));
    }
}
