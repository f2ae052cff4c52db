//! Item input.
//!
//! Loads item lists from JSON files. Each entry is either a
//! `[weight, value]` pair or a `{"weight": w, "value": v}` object; the
//! two forms may be mixed in one file.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::types::Item;

/// Accepted on-disk shapes for a single item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItem {
    Pair(Decimal, Decimal),
    Named { weight: Decimal, value: Decimal },
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        match raw {
            RawItem::Pair(weight, value) => Item::new(weight, value),
            RawItem::Named { weight, value } => Item::new(weight, value),
        }
    }
}

/// Parse an item list from a JSON string.
pub fn parse_items(json: &str) -> Result<Vec<Item>> {
    let raw: Vec<RawItem> =
        serde_json::from_str(json).context("Failed to parse item list")?;
    Ok(raw.into_iter().map(Item::from).collect())
}

/// Load an item list from a JSON file.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {}", path.display()))?;

    let items = parse_items(&json)
        .with_context(|| format!("Failed to load items from {}", path.display()))?;

    info!(path = %path.display(), count = items.len(), "Items loaded");
    Ok(items)
}

/// The built-in example set: `[(5,10), (4,40), (6,30), (3,50)]`.
pub fn reference_items() -> Vec<Item> {
    let items: Vec<Item> = [(5, 10), (4, 40), (6, 30), (3, 50)]
        .into_iter()
        .map(Item::from)
        .collect();
    debug!(count = items.len(), "Using reference items");
    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
