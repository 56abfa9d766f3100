// Demo entries merged into a fresh log so the analyzer has something to show.
use crate::model::PriceEntry;
use chrono::{TimeZone, Utc};

const SEED: [(&str, &str, &str, f64, f64, &str, (i32, u32, u32)); 12] = [
    ("1", "Publix", "Carrots", 2.99, 2.0, "lb", (2024, 1, 15)),
    ("2", "Walmart", "Carrots", 2.49, 2.0, "lb", (2024, 1, 20)),
    ("3", "Kroger", "Carrots", 1.99, 1.0, "lb", (2024, 2, 1)),
    ("4", "Publix", "Milk", 4.99, 1.0, "each", (2024, 1, 15)),
    ("5", "Walmart", "Milk", 3.99, 1.0, "each", (2024, 1, 25)),
    ("6", "Kroger", "Milk", 4.49, 1.0, "each", (2024, 2, 1)),
    ("7", "Publix", "Bananas", 2.49, 3.0, "lb", (2024, 1, 10)),
    ("8", "Walmart", "Bananas", 1.99, 3.0, "lb", (2024, 1, 20)),
    ("9", "Kroger", "Bananas", 2.29, 3.0, "lb", (2024, 1, 30)),
    ("10", "Publix", "Bread", 3.99, 1.0, "each", (2024, 1, 15)),
    ("11", "Walmart", "Bread", 2.99, 1.0, "each", (2024, 1, 25)),
    ("12", "Kroger", "Bread", 3.49, 1.0, "each", (2024, 2, 1)),
];

pub fn seed_entries() -> Vec<PriceEntry> {
    SEED.iter()
        .filter_map(|&(id, store, item, price, quantity, unit, (y, m, d))| {
            let date = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).single()?;
            Some(PriceEntry {
                id: id.to_string(),
                store: store.to_string(),
                item: item.to_string(),
                price,
                quantity,
                unit: unit.to_string(),
                date,
            })
        })
        .collect()
}
