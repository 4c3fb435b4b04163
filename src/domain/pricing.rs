use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Materials consumed by one trade-up contract.
pub const TRADE_UP_INPUTS: usize = 5;

/// An item and its lowest known sell price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub name: String,
    #[serde(default)]
    pub min_price: f64,
}

impl PricedItem {
    pub fn new(name: impl Into<String>, min_price: f64) -> Self {
        Self {
            name: name.into(),
            min_price,
        }
    }
}

/// Outcome of a batch price refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub attempted: usize,
    pub updated: usize,
}

impl RefreshSummary {
    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.updated)
    }
}

/// Usable quote: finite and strictly positive.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Writes quotes into `items` by item name.
///
/// Items without a usable quote keep their stored price, so a failed lookup
/// never overwrites a known price with zero.
pub fn apply_quotes(items: &mut [PricedItem], quotes: &HashMap<String, Option<f64>>) -> RefreshSummary {
    let mut summary = RefreshSummary::default();
    for item in items.iter_mut() {
        let Some(quote) = quotes.get(&item.name) else {
            continue;
        };
        summary.attempted += 1;
        if let Some(price) = quote.filter(|price| is_valid_price(*price)) {
            item.min_price = price;
            summary.updated += 1;
        }
    }
    summary
}

pub fn average_price(items: &[PricedItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(|item| item.min_price).sum::<f64>() / items.len() as f64
}

/// Per-material price at which a trade-up breaks even against the average output.
pub fn break_even_material_price(average_output_price: f64) -> f64 {
    if average_output_price > 0.0 {
        average_output_price / TRADE_UP_INPUTS as f64
    } else {
        0.0
    }
}

/// Cheapest first; ties keep their original order.
pub fn sorted_by_price(items: &[PricedItem]) -> Vec<&PricedItem> {
    let mut sorted: Vec<&PricedItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.min_price.total_cmp(&b.min_price));
    sorted
}
