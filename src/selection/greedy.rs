//! Step-limited greedy selection.
//!
//! Ranks items by value per unit weight and takes the highest-ranked
//! ones until the step limit is reached. Weight is never budgeted here:
//! this picks the K best-ratio items, nothing more. The weight-bounded
//! variant lives in `capacity`.

use rust_decimal::Decimal;
use tracing::debug;

use crate::types::{Item, SelectError, Selection};

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// An item paired with its input position and ranking key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ranked {
    pub index: usize,
    pub item: Item,
    pub ratio: Decimal,
}

/// Compute every ranking key, then sort by ratio descending.
///
/// All keys are computed before sorting, so a zero weight anywhere in
/// the input fails the whole call. Only a zero weight fails; quotients
/// beyond the `Decimal` range saturate (see [`Item::ratio`]). The sort
/// is stable: equal ratios keep their input order.
pub(crate) fn rank(items: &[Item]) -> Result<Vec<Ranked>, SelectError> {
    let mut ranked = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.ratio()
                .map(|ratio| Ranked {
                    index,
                    item: *item,
                    ratio,
                })
                .ok_or(SelectError::Arithmetic {
                    index,
                    weight: item.weight,
                    value: item.value,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ranked.sort_by(|a, b| b.ratio.cmp(&a.ratio));
    Ok(ranked)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pick up to `limit` items in ratio order and sum their values.
///
/// The caller's slice is not touched; ranking happens on a private copy.
pub fn select(items: &[Item], limit: usize) -> Result<Selection, SelectError> {
    let ranked = rank(items)?;
    take_steps(&ranked, limit)
}

/// Same as [`select`], but leaves `items` reordered by ratio descending
/// on success. On error the slice is left as it was.
pub fn select_in_place(items: &mut [Item], limit: usize) -> Result<Selection, SelectError> {
    let ranked = rank(items)?;
    let selection = take_steps(&ranked, limit)?;
    for (slot, r) in items.iter_mut().zip(&ranked) {
        *slot = r.item;
    }
    Ok(selection)
}

/// Walk the ranked sequence, checking the limit before each item.
fn take_steps(ranked: &[Ranked], limit: usize) -> Result<Selection, SelectError> {
    let mut selection = Selection::default();

    for r in ranked {
        if selection.steps() >= limit {
            break;
        }
        selection.take(r.index, &r.item)?;
        debug!(
            index = r.index,
            ratio = %r.ratio,
            value = %r.item.value,
            total = %selection.total_value,
            step = selection.steps(),
            "Item taken"
        );
    }

    Ok(selection)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
