// Command handlers for the CLI. Each returns the text to print.
use crate::analyzer::catalog::{recent_first, suggest, unique_items, unique_stores};
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::config::AppConfig;
use crate::model::{ConfigError, EntryError, PriceEntry, StorageError};
use crate::normalizer::{EntryDraft, apply_edit, create_entry, validate_entry};
use crate::report::{render_analysis, render_entry, render_history};
use crate::storage::SqliteStorage;
use crate::utils::parse_datetime;
use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Store name, e.g. Publix
    #[arg(long)]
    pub store: String,
    /// Item name, e.g. Carrots
    #[arg(long)]
    pub item: String,
    /// Total price paid
    #[arg(long)]
    pub price: f64,
    /// Amount purchased
    #[arg(long)]
    pub quantity: f64,
    /// Unit label, e.g. lb, oz, each
    #[arg(long)]
    pub unit: String,
}

impl From<EntryArgs> for EntryDraft {
    fn from(args: EntryArgs) -> Self {
        EntryDraft {
            store: args.store,
            item: args.item,
            price: args.price,
            quantity: args.quantity,
            unit: args.unit,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SuggestField {
    Store,
    Item,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a price
    Add {
        #[command(flatten)]
        entry: EntryArgs,
        /// When the price was seen (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace the fields of an existing entry
    Edit {
        id: String,
        #[command(flatten)]
        entry: EntryArgs,
    },
    /// Remove an entry
    Delete { id: String },
    /// List entries, newest first
    List,
    /// List known items
    Items,
    /// List known stores
    Stores,
    /// Autocomplete a store or item name
    Suggest {
        #[arg(value_enum)]
        field: SuggestField,
        #[arg(default_value = "")]
        query: String,
    },
    /// Best, average and per-store prices for an item
    Analyze { item: String },
    /// Per-unit price history for an item
    History { item: String },
    /// Write all entries to a JSON file
    Export { path: PathBuf },
    /// Merge entries from a JSON file; known ids are skipped
    Import { path: PathBuf },
}

pub fn handle_command(
    command: Command,
    storage: &SqliteStorage,
    config: &AppConfig,
) -> Result<String, CommandError> {
    let symbol = config.currency_symbol.as_str();
    match command {
        Command::Add { entry, date } => {
            let now = match date {
                Some(raw) => parse_datetime(&raw).ok_or(CommandError::InvalidDate(raw))?,
                None => Utc::now(),
            };
            let entry = create_entry(entry.into(), now)?;
            storage.add_entry(&entry)?;
            info!("Recorded {} at {}", entry.item, entry.store);
            Ok(format!("✅ Added {}", render_entry(&entry, symbol)))
        }
        Command::Edit { id, entry } => {
            let existing = storage
                .get_entry(&id)?
                .ok_or_else(|| StorageError::NotFound(id.clone()))?;
            let updated = apply_edit(&existing, entry.into(), Utc::now())?;
            storage.update_entry(&updated)?;
            Ok(format!("✏️ Updated {}", render_entry(&updated, symbol)))
        }
        Command::Delete { id } => {
            storage.delete_entry(&id)?;
            Ok(format!("🗑 Deleted entry {}", id))
        }
        Command::List => {
            let entries = storage.get_all_entries()?;
            if entries.is_empty() {
                return Ok("📭 No entries yet.".to_string());
            }
            Ok(recent_first(&entries)
                .into_iter()
                .map(|e| render_entry(e, symbol))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Items => Ok(unique_items(&storage.get_all_entries()?).join("\n")),
        Command::Stores => Ok(unique_stores(&storage.get_all_entries()?).join("\n")),
        Command::Suggest { field, query } => {
            let entries = storage.get_all_entries()?;
            let candidates = match field {
                SuggestField::Store => unique_stores(&entries),
                SuggestField::Item => unique_items(&entries),
            };
            Ok(suggest(&candidates, &query).join("\n"))
        }
        Command::Analyze { item } => {
            let entries = storage.get_all_entries()?;
            match AnalyzerImpl::new().analyze(&entries, &item) {
                Some(analysis) => Ok(render_analysis(&analysis, symbol)),
                None => Ok(format!("📭 No prices recorded for '{}'.", item)),
            }
        }
        Command::History { item } => {
            let entries = storage.get_all_entries()?;
            let points = AnalyzerImpl::new().history(&entries, &item);
            if points.is_empty() {
                return Ok(format!("📭 No prices recorded for '{}'.", item));
            }
            Ok(render_history(&points, symbol))
        }
        Command::Export { path } => {
            let entries = storage.get_all_entries()?;
            fs::write(&path, serde_json::to_string_pretty(&entries)?)?;
            Ok(format!("💾 Exported {} entries to {}", entries.len(), path.display()))
        }
        Command::Import { path } => {
            let content = fs::read_to_string(&path)?;
            let entries: Vec<PriceEntry> = serde_json::from_str(&content)?;
            for entry in &entries {
                validate_entry(entry)?;
            }
            let inserted = storage.merge_entries(&entries)?;
            Ok(format!(
                "📥 Imported {} new entries ({} already known)",
                inserted,
                entries.len() - inserted
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_entries;

    fn seeded() -> SqliteStorage {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.merge_entries(&seed_entries()).unwrap();
        storage
    }

    fn args(price: f64, quantity: f64) -> EntryArgs {
        EntryArgs {
            store: "Aldi".into(),
            item: "Carrots".into(),
            price,
            quantity,
            unit: "lb".into(),
        }
    }

    #[test]
    fn add_then_analyze_picks_new_best() {
        let storage = seeded();
        let config = AppConfig::default();
        let add = Command::Add { entry: args(1.00, 2.0), date: Some("2024-03-01".into()) };
        handle_command(add, &storage, &config).unwrap();

        let out = handle_command(Command::Analyze { item: "Carrots".into() }, &storage, &config).unwrap();
        assert!(out.contains("Best price: $0.50 per lb"));
        assert!(out.contains("Aldi (2024-03-01)"));
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let storage = seeded();
        let add = Command::Add { entry: args(1.00, 0.0), date: None };
        let err = handle_command(add, &storage, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CommandError::Entry(EntryError::InvalidQuantity(_))));
        assert_eq!(storage.get_all_entries().unwrap().len(), 12);
    }

    #[test]
    fn add_rejects_bad_date() {
        let add = Command::Add { entry: args(1.00, 1.0), date: Some("yesterday".into()) };
        let err = handle_command(add, &seeded(), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CommandError::InvalidDate(_)));
    }

    #[test]
    fn unknown_item_is_not_an_error() {
        let storage = seeded();
        let config = AppConfig::default();
        let out = handle_command(Command::Analyze { item: "Caviar".into() }, &storage, &config).unwrap();
        assert!(out.contains("No prices recorded"));
        let out = handle_command(Command::History { item: "".into() }, &storage, &config).unwrap();
        assert!(out.contains("No prices recorded"));
    }

    #[test]
    fn edit_and_delete_unknown_ids() {
        let storage = seeded();
        let config = AppConfig::default();
        let edit = Command::Edit { id: "404".into(), entry: args(1.0, 1.0) };
        assert!(matches!(
            handle_command(edit, &storage, &config),
            Err(CommandError::Storage(StorageError::NotFound(_)))
        ));

        handle_command(Command::Delete { id: "1".into() }, &storage, &config).unwrap();
        assert!(storage.get_entry("1").unwrap().is_none());
    }

    #[test]
    fn suggest_and_catalog() {
        let storage = seeded();
        let config = AppConfig::default();
        let out = handle_command(
            Command::Suggest { field: SuggestField::Store, query: "rog".into() },
            &storage,
            &config,
        )
        .unwrap();
        assert_eq!(out, "Kroger");
        let items = handle_command(Command::Items, &storage, &config).unwrap();
        assert_eq!(items, "Bananas\nBread\nCarrots\nMilk");
    }
}
