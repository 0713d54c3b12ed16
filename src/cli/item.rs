//! Item CLI commands
//!
//! Implements CLI commands for credential items.

use clap::Subcommand;

use crate::display::item::{format_item_details, format_item_list};
use crate::error::{WalletError, WalletResult};
use crate::models::{Field, FieldType, Item};
use crate::passwords::{generate_password, password_strength_category};

use super::password::GeneratorArgs;
use super::session::Session;

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a new item
    Add {
        /// Item name
        name: String,
        /// Field as `type:name=value`, e.g. `password:Password=hunter2`
        /// (repeatable; append `!` to the type to mark it sensitive)
        #[arg(short, long = "field")]
        fields: Vec<String>,
        /// Append a password field with this name holding a generated value
        #[arg(short, long, value_name = "FIELD")]
        generate: Option<String>,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// List items
    List {
        /// Only items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show an item with its fields
    Show {
        /// Item name or ID
        item: String,
        /// Show sensitive values in clear
        #[arg(short, long)]
        reveal: bool,
    },
    /// Edit an item
    Edit {
        /// Item name or ID
        item: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Replace all fields (repeatable, `type:name=value`)
        #[arg(short, long = "field")]
        fields: Vec<String>,
        /// Append a field (repeatable, `type:name=value`)
        #[arg(short, long = "add-field")]
        add_fields: Vec<String>,
    },
    /// Delete an item
    Delete {
        /// Item name or ID
        item: String,
    },
    /// Copy an item under a new ID
    Duplicate {
        /// Item name or ID
        item: String,
    },
}

/// Handle an item command
pub fn handle_item_command(session: &Session, cmd: ItemCommands) -> WalletResult<()> {
    let store = session.store();
    let crypto = session.unlock()?;
    let mut wallet = store.load(&crypto)?;

    match cmd {
        ItemCommands::Add {
            name,
            fields,
            generate,
            generator,
        } => {
            let mut fields = parse_fields(&fields)?;
            if let Some(field_name) = generate {
                let value = generate_password(&generator.into())?;
                println!(
                    "Generated {} ({})",
                    field_name,
                    password_strength_category(&value)
                );
                fields.push(Field::new(field_name, value, FieldType::Password, true));
            }
            let item = Item::with_fields(name, fields);
            let id = item.id().clone();

            wallet.add_item(item)?;
            store.save(&wallet, &crypto)?;

            println!("Added item: {}", id);
        }

        ItemCommands::List { search } => {
            let needle = search.as_deref().map(str::to_lowercase);
            let mut items: Vec<&Item> = wallet
                .items()
                .filter(|item| match &needle {
                    Some(needle) => item.name().to_lowercase().contains(needle),
                    None => true,
                })
                .collect();
            items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));

            print!("{}", format_item_list(&items, session.settings()));
        }

        ItemCommands::Show { item, reveal } => {
            let found = wallet.find(&item)?;
            print!("{}", format_item_details(found, session.settings(), reveal));
        }

        ItemCommands::Edit {
            item,
            name,
            fields,
            add_fields,
        } => {
            if name.is_none() && fields.is_empty() && add_fields.is_empty() {
                println!("No changes specified. Use --name, --field or --add-field.");
                return Ok(());
            }

            let found = wallet.find(&item)?;
            let id = found.id().clone();
            let new_name = name.unwrap_or_else(|| found.name().to_string());
            let mut new_fields = if fields.is_empty() {
                found.fields().to_vec()
            } else {
                parse_fields(&fields)?
            };
            new_fields.extend(parse_fields(&add_fields)?);

            wallet.edit_item(id.as_str(), &new_name, new_fields)?;
            store.save(&wallet, &crypto)?;

            println!("Updated item: {} ({})", new_name, id);
        }

        ItemCommands::Delete { item } => {
            let id = wallet.find(&item)?.id().clone();
            let removed = wallet.delete_item(id.as_str())?;
            store.save(&wallet, &crypto)?;

            println!("Deleted item: {}", removed);
        }

        ItemCommands::Duplicate { item } => {
            let id = wallet.find(&item)?.id().clone();
            let new_id = wallet.duplicate_item(id.as_str())?;
            store.save(&wallet, &crypto)?;

            println!("Duplicated item: {} -> {}", id, new_id);
        }
    }

    Ok(())
}

fn parse_fields(args: &[String]) -> WalletResult<Vec<Field>> {
    args.iter().map(|arg| parse_field_arg(arg)).collect()
}

/// Parse `type[!]:name=value`
///
/// `password` and `pin` fields are sensitive by default; `!` after the type
/// marks any field sensitive. The value may itself contain `=` or `:`.
pub fn parse_field_arg(arg: &str) -> WalletResult<Field> {
    let invalid = || {
        WalletError::Validation(format!(
            "Invalid field '{}'. Use type:name=value, e.g. password:Password=secret",
            arg
        ))
    };

    let (type_part, rest) = arg.split_once(':').ok_or_else(invalid)?;
    let (name, value) = rest.split_once('=').ok_or_else(invalid)?;

    let (type_name, forced) = match type_part.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (type_part, false),
    };

    let type_name = type_name.trim().to_lowercase();
    let field_type = FieldType::parse(&type_name);
    if field_type == FieldType::Undefined && type_name != FieldType::Undefined.as_str() {
        let valid: Vec<&str> = FieldType::all().map(|t| t.as_str()).collect();
        return Err(WalletError::Validation(format!(
            "Invalid field type: '{}'. Valid types: {}",
            type_name,
            valid.join(", ")
        )));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(Field::new(
        name,
        value,
        field_type,
        forced || field_type.is_secret(),
    ))
}
