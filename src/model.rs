// Core structs: PriceEntry, PriceAnalysis, HistoryPoint
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recorded price sighting for an item at a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub id: String,
    pub store: String,
    pub item: String,
    pub price: f64,
    pub quantity: f64,
    pub unit: String,
    pub date: DateTime<Utc>,
}

impl PriceEntry {
    /// `price / quantity`. A zero quantity yields inf/NaN; producers never store one.
    pub fn price_per_unit(&self) -> f64 {
        self.price / self.quantity
    }
}

/// Raw fields of a winning entry, as shown on a price card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub store: String,
    pub price: f64,
    pub quantity: f64,
    pub unit: String,
    pub date: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn price_per_unit(&self) -> f64 {
        self.price / self.quantity
    }
}

impl From<&PriceEntry> for PriceSnapshot {
    fn from(entry: &PriceEntry) -> Self {
        Self {
            store: entry.store.clone(),
            price: entry.price,
            quantity: entry.quantity,
            unit: entry.unit.clone(),
            date: entry.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAnalysis {
    pub item: String,
    pub best_price: PriceSnapshot,
    pub average_price_per_unit: f64,
    /// Cheapest entry per store, in order of the store's first appearance.
    pub per_store_best: Vec<PriceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: DateTime<Utc>,
    pub price_per_unit: f64,
    pub store: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(f64),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("duplicate entry id: {0}")]
    DuplicateId(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
