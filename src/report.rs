// Plain-text rendering of analyzer results for the terminal.
use crate::model::{HistoryPoint, PriceAnalysis, PriceEntry};
use crate::utils::{format_date, format_money};
use std::fmt::Write as _;

/// Best price card, average card and store comparison.
/// The average is labelled with the best entry's unit; mixed units are not reconciled.
pub fn render_analysis(analysis: &PriceAnalysis, symbol: &str) -> String {
    let best = &analysis.best_price;
    let mut msg = format!("📊 {} - Price Analysis\n\n", analysis.item);

    let _ = writeln!(
        msg,
        "🏆 Best price: {} per {}\n   {} ({})",
        format_money(symbol, best.price_per_unit()),
        best.unit,
        best.store,
        format_date(&best.date)
    );
    let _ = writeln!(
        msg,
        "📈 Average price: {} per {}\n",
        format_money(symbol, analysis.average_price_per_unit),
        best.unit
    );

    msg.push_str("🏪 Store comparison:\n");
    for store in &analysis.per_store_best {
        let _ = writeln!(
            msg,
            "🔹 {} — {} per {} ({})",
            store.store,
            format_money(symbol, store.price_per_unit()),
            store.unit,
            format_date(&store.date)
        );
    }
    msg
}

pub fn render_history(points: &[HistoryPoint], symbol: &str) -> String {
    let mut msg = String::new();
    for point in points {
        let _ = writeln!(
            msg,
            "{}  {:>10}  {}",
            format_date(&point.date),
            format_money(symbol, point.price_per_unit),
            point.store
        );
    }
    msg
}

pub fn render_entry(entry: &PriceEntry, symbol: &str) -> String {
    format!(
        "[{}] {} @ {} — {} for {} {} ({})",
        entry.id,
        entry.item,
        entry.store,
        format_money(symbol, entry.price),
        entry.quantity,
        entry.unit,
        format_date(&entry.date)
    )
}
