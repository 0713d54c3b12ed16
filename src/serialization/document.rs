//! Plaintext wallet document
//!
//! The document is the JSON form of a wallet before encryption:
//!
//! ```json
//! {"items": {"<id>": {"name": "...", "last_edited": 0,
//!   "fields": [{"name": "...", "value": "...", "type": "password", "sensitive": true}]}}}
//! ```
//!
//! Reading is lenient inside an item (missing or `null` strings are empty,
//! unknown field types are `undefined`) but the document itself must be a JSON
//! object whose `items`, if present, is an object.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{WalletError, WalletResult};
use crate::models::{current_timestamp, Field, FieldType, Item, ItemId, Wallet};

#[derive(Debug, Serialize, Deserialize)]
struct DocumentRoot {
    #[serde(default, deserialize_with = "null_as_default")]
    items: BTreeMap<String, DocumentItem>,
    /// Not written; accepted on read and superseded by the envelope
    #[serde(default, skip_serializing)]
    timestamp: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentItem {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    last_edited: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    fields: Vec<DocumentField>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentField {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    value: String,
    #[serde(
        rename = "type",
        default,
        serialize_with = "write_field_type",
        deserialize_with = "read_field_type"
    )]
    field_type: FieldType,
    #[serde(default, deserialize_with = "null_as_default")]
    sensitive: bool,
}

fn write_field_type<S: Serializer>(field_type: &FieldType, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(field_type.as_str())
}

/// Any string maps through `FieldType::parse`; any other JSON value is `Undefined`
fn read_field_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FieldType, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .map(FieldType::parse)
        .unwrap_or(FieldType::Undefined))
}

/// `null` reads the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&Field> for DocumentField {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            field_type: field.field_type,
            sensitive: field.sensitive,
        }
    }
}

impl From<DocumentField> for Field {
    fn from(field: DocumentField) -> Self {
        Field::new(field.name, field.value, field.field_type, field.sensitive)
    }
}

/// Serialize a wallet's items to a compact JSON document
pub fn to_document(wallet: &Wallet) -> WalletResult<String> {
    let items = wallet
        .items()
        .map(|item| {
            (
                item.id().to_string(),
                DocumentItem {
                    name: item.name().to_string(),
                    last_edited: item.last_edited(),
                    fields: item.fields().iter().map(DocumentField::from).collect(),
                },
            )
        })
        .collect();

    let root = DocumentRoot {
        items,
        timestamp: None,
    };
    serde_json::to_string(&root).map_err(WalletError::from)
}

/// Parse a JSON document into a wallet
///
/// The wallet timestamp is the document's `timestamp` if it carries one,
/// otherwise the current time.
pub fn from_document(json: &str) -> WalletResult<Wallet> {
    let invalid = |e: String| WalletError::InvalidFormat(format!("Invalid wallet document: {}", e));

    let value: Value = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
    check_shape(&value).map_err(|e| invalid(e.to_string()))?;
    let root: DocumentRoot = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

    let timestamp = root.timestamp.unwrap_or_else(current_timestamp);
    let items = root.items.into_iter().map(|(id, raw)| {
        Item::restore(
            ItemId::from(id),
            raw.name,
            raw.fields.into_iter().map(Field::from).collect(),
            raw.last_edited,
        )
    });

    // JSON object keys are unique after parsing, so this cannot collide.
    Wallet::from_items(timestamp, items)
}

/// Serde accepts a JSON array where a struct is expected; the document
/// format only allows objects at the root, per item and per field.
fn check_shape(value: &Value) -> Result<(), &'static str> {
    let root = value.as_object().ok_or("expected a JSON object")?;

    let items = match root.get("items") {
        None | Some(Value::Null) => return Ok(()),
        Some(items) => items.as_object().ok_or("`items` must be an object")?,
    };

    for item in items.values() {
        let item = item.as_object().ok_or("each item must be an object")?;
        if let Some(Value::Array(fields)) = item.get("fields") {
            if !fields.iter().all(Value::is_object) {
                return Err("each field must be an object");
            }
        }
    }
    Ok(())
}
