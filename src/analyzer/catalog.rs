use crate::model::PriceEntry;
use std::collections::BTreeSet;

/// Distinct item names, sorted.
pub fn unique_items(entries: &[PriceEntry]) -> Vec<String> {
    distinct(entries.iter().map(|e| e.item.as_str()))
}

/// Distinct store names, sorted.
pub fn unique_stores(entries: &[PriceEntry]) -> Vec<String> {
    distinct(entries.iter().map(|e| e.store.as_str()))
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Autocomplete: case-insensitive substring match, keeping candidate order.
/// A blank query matches everything.
pub fn suggest(candidates: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Entries newest-added first.
pub fn recent_first(entries: &[PriceEntry]) -> Vec<&PriceEntry> {
    entries.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(id: &str, store: &str, item: &str) -> PriceEntry {
        PriceEntry {
            id: id.into(),
            store: store.into(),
            item: item.into(),
            price: 1.0,
            quantity: 1.0,
            unit: "each".into(),
            date: Utc::now(),
        }
    }

    #[test]
    fn items_and_stores_are_distinct_and_sorted() {
        let entries = vec![
            entry("1", "Walmart", "Milk"),
            entry("2", "Publix", "Bread"),
            entry("3", "Walmart", "Bread"),
        ];
        assert_eq!(unique_items(&entries), vec!["Bread", "Milk"]);
        assert_eq!(unique_stores(&entries), vec!["Publix", "Walmart"]);
        assert!(unique_items(&[]).is_empty());
    }

    #[test]
    fn suggest_matches_case_insensitively() {
        let stores = vec!["Kroger".to_string(), "Publix".to_string(), "Walmart".to_string()];
        assert_eq!(suggest(&stores, "PUB"), vec!["Publix"]);
        assert_eq!(suggest(&stores, " r "), vec!["Kroger", "Walmart"]);
        assert_eq!(suggest(&stores, ""), stores);
        assert!(suggest(&stores, "target").is_empty());
    }

    #[test]
    fn recent_first_reverses_log_order() {
        let entries = vec![entry("1", "A", "x"), entry("2", "B", "y")];
        let ids: Vec<&str> = recent_first(&entries).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
