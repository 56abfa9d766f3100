use crate::model::{EntryError, PriceEntry};
use chrono::{DateTime, Utc};

/// Raw form input for a new or edited entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub store: String,
    pub item: String,
    pub price: f64,
    pub quantity: f64,
    pub unit: String,
}

/// Trims text fields and checks the constraints the analyzer relies on.
pub fn validate(draft: EntryDraft) -> Result<EntryDraft, EntryError> {
    let store = required(&draft.store, "store")?;
    let item = required(&draft.item, "item")?;
    let unit = required(&draft.unit, "unit")?;
    check_amounts(draft.price, draft.quantity)?;

    Ok(EntryDraft {
        store,
        item,
        price: draft.price,
        quantity: draft.quantity,
        unit,
    })
}

/// Builds a new entry with a fresh id, stamped with `now`.
pub fn create_entry(draft: EntryDraft, now: DateTime<Utc>) -> Result<PriceEntry, EntryError> {
    let draft = validate(draft)?;
    Ok(build(new_id(now), draft, now))
}

/// Replaces the fields of `existing`, keeping its id. The date is re-stamped.
pub fn apply_edit(
    existing: &PriceEntry,
    draft: EntryDraft,
    now: DateTime<Utc>,
) -> Result<PriceEntry, EntryError> {
    let draft = validate(draft)?;
    Ok(build(existing.id.clone(), draft, now))
}

/// Checks an entry that did not come through the form, e.g. from an import file.
pub fn validate_entry(entry: &PriceEntry) -> Result<(), EntryError> {
    for (value, name) in [
        (&entry.id, "id"),
        (&entry.store, "store"),
        (&entry.item, "item"),
        (&entry.unit, "unit"),
    ] {
        required(value, name)?;
    }
    check_amounts(entry.price, entry.quantity)
}

fn required(value: &str, name: &'static str) -> Result<String, EntryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EntryError::MissingField(name));
    }
    Ok(trimmed.to_string())
}

fn check_amounts(price: f64, quantity: f64) -> Result<(), EntryError> {
    if !price.is_finite() || price < 0.0 {
        return Err(EntryError::InvalidPrice(price));
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(EntryError::InvalidQuantity(quantity));
    }
    Ok(())
}

fn new_id(now: DateTime<Utc>) -> String {
    format!("{}-{:04x}", now.timestamp_millis(), rand::random::<u16>())
}

fn build(id: String, draft: EntryDraft, now: DateTime<Utc>) -> PriceEntry {
    PriceEntry {
        id,
        store: draft.store,
        item: draft.item,
        price: draft.price,
        quantity: draft.quantity,
        unit: draft.unit,
        date: now,
    }
}
