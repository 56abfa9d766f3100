use crate::model::{HistoryPoint, PriceAnalysis, PriceEntry, PriceSnapshot};
use std::collections::HashMap;

/// Trait defining the interface for a price analyzer.
pub trait Analyzer {
    /// Best, average and per-store prices for `item`, or `None` when nothing matches.
    fn analyze(&self, entries: &[PriceEntry], item: &str) -> Option<PriceAnalysis>;
    /// Per-unit prices for `item` in ascending date order.
    fn history(&self, entries: &[PriceEntry], item: &str) -> Vec<HistoryPoint>;
}

/// Stateless implementation of the price analyzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

fn entries_for<'a>(entries: &'a [PriceEntry], item: &'a str) -> impl Iterator<Item = &'a PriceEntry> {
    entries.iter().filter(move |e| !item.is_empty() && e.item == item)
}

impl Analyzer for AnalyzerImpl {
    /// Ties keep the first entry seen, both globally and per store.
    fn analyze(&self, entries: &[PriceEntry], item: &str) -> Option<PriceAnalysis> {
        let matching: Vec<&PriceEntry> = entries_for(entries, item).collect();
        let first = *matching.first()?;

        let mut best = first;
        let mut sum = 0.0;
        let mut store_index: HashMap<&str, usize> = HashMap::new();
        let mut per_store: Vec<&PriceEntry> = Vec::new();

        for &entry in &matching {
            let ppu = entry.price_per_unit();
            sum += ppu;

            if ppu < best.price_per_unit() {
                best = entry;
            }

            match store_index.get(entry.store.as_str()) {
                Some(&idx) => {
                    if ppu < per_store[idx].price_per_unit() {
                        per_store[idx] = entry;
                    }
                }
                None => {
                    store_index.insert(entry.store.as_str(), per_store.len());
                    per_store.push(entry);
                }
            }
        }

        Some(PriceAnalysis {
            item: item.to_string(),
            best_price: PriceSnapshot::from(best),
            average_price_per_unit: sum / matching.len() as f64,
            per_store_best: per_store.into_iter().map(PriceSnapshot::from).collect(),
        })
    }

    fn history(&self, entries: &[PriceEntry], item: &str) -> Vec<HistoryPoint> {
        let mut points: Vec<HistoryPoint> = entries_for(entries, item)
            .map(|e| HistoryPoint {
                date: e.date,
                price_per_unit: e.price_per_unit(),
                store: e.store.clone(),
            })
            .collect();
        // sort_by_key is stable: equal timestamps keep log order.
        points.sort_by_key(|p| p.date);
        points
    }
}
