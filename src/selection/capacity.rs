//! Weight-bounded greedy selection.
//!
//! Same ranking and step limit as `greedy`, but an item is only taken if
//! its weight still fits the remaining capacity. Items that do not fit
//! are skipped and do not count as a step. Still a heuristic: no
//! optimality guarantee.

use rust_decimal::Decimal;
use tracing::debug;

use super::greedy::rank;
use crate::types::{Item, SelectError, Selection};

/// Pick up to `limit` items in ratio order whose combined weight stays
/// within `capacity`.
pub fn select_within_capacity(
    items: &[Item],
    capacity: Decimal,
    limit: usize,
) -> Result<Selection, SelectError> {
    let ranked = rank(items)?;
    let mut selection = Selection::default();

    for r in &ranked {
        if selection.steps() >= limit {
            break;
        }
        let Some(remaining) = capacity.checked_sub(selection.total_weight) else {
            break;
        };
        if r.item.weight > remaining {
            debug!(
                index = r.index,
                weight = %r.item.weight,
                remaining = %remaining,
                "Item does not fit"
            );
            continue;
        }
        selection.take(r.index, &r.item)?;
    }

    Ok(selection)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
