//! Shared types for SATCHEL.
//!
//! These types form the data model used by the selection algorithms,
//! the input loader and the binary. They carry no behaviour beyond
//! small helpers so that every module can depend on them freely.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A candidate item: how much it weighs and what it is worth.
///
/// Identity is positional only: an item is known by its index in the
/// input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: Decimal,
    pub value: Decimal,
}

impl Item {
    pub fn new(weight: Decimal, value: Decimal) -> Self {
        Self { weight, value }
    }

    /// Value per unit weight, the ranking key.
    ///
    /// `None` only for a zero weight. A quotient beyond the `Decimal`
    /// range saturates to `Decimal::MAX` (or `Decimal::MIN` when the signs
    /// differ), which keeps its place at the extreme of the ranking.
    pub fn ratio(&self) -> Option<Decimal> {
        if self.weight.is_zero() {
            return None;
        }
        let ratio = self.value.checked_div(self.weight).unwrap_or_else(|| {
            if self.value.is_sign_negative() != self.weight.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        });
        Some(ratio)
    }
}

impl From<(i64, i64)> for Item {
    fn from((weight, value): (i64, i64)) -> Self {
        Self::new(Decimal::from(weight), Decimal::from(value))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(w={}, v={})", self.weight, self.value)
    }
}

// ---------------------------------------------------------------------------
// Step limit
// ---------------------------------------------------------------------------

/// Convert a signed step limit (as found in config files) into the
/// unsigned limit the algorithms take. Anything at or below zero means
/// "select nothing".
pub fn step_limit_from(k: i64) -> usize {
    if k <= 0 {
        0
    } else {
        usize::try_from(k).unwrap_or(usize::MAX)
    }
}

// ---------------------------------------------------------------------------
// Input policy
// ---------------------------------------------------------------------------

/// Whether inputs are checked before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Trust the caller. A zero weight surfaces as an arithmetic fault,
    /// negative numbers flow through the arithmetic unchanged.
    #[default]
    Lenient,
    /// Reject non-positive weights and negative values up front.
    Strict,
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputPolicy::Lenient => write!(f, "lenient"),
            InputPolicy::Strict => write!(f, "strict"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Sum of the values of every picked item.
    pub total_value: Decimal,
    /// Sum of the weights of every picked item, saturating at the
    /// `Decimal` bounds.
    pub total_weight: Decimal,
    /// Input indices of the picked items, in pick order.
    pub picked: Vec<usize>,
}

impl Selection {
    /// Number of steps taken (items picked).
    pub fn steps(&self) -> usize {
        self.picked.len()
    }

    /// Add an item to the selection. Fails without modifying `self` if
    /// the value sum would leave the `Decimal` range; the weight sum
    /// saturates instead.
    pub(crate) fn take(&mut self, index: usize, item: &Item) -> Result<(), SelectError> {
        let total_value = self
            .total_value
            .checked_add(item.value)
            .ok_or(SelectError::Overflow { steps: self.steps() })?;
        self.total_value = total_value;
        self.total_weight = self.total_weight.saturating_add(item.weight);
        self.picked.push(index);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Printable record of one run of the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub run_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub step_limit: usize,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub capacity: Option<Decimal>,
    pub policy: InputPolicy,
    pub items_considered: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_weight: Decimal,
    pub picked: Vec<usize>,
}

impl SelectionReport {
    pub fn new(
        selection: &Selection,
        step_limit: usize,
        capacity: Option<Decimal>,
        policy: InputPolicy,
        items_considered: usize,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            computed_at: Utc::now(),
            step_limit,
            capacity,
            policy,
            items_considered,
            total_value: selection.total_value,
            total_weight: selection.total_weight,
            picked: selection.picked.clone(),
        }
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let picked: Vec<String> = self.picked.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "Total value: {} | picked {}/{} (limit {}) [{}] | weight {}",
            self.total_value,
            self.picked.len(),
            self.items_considered,
            self.step_limit,
            picked.join(", "),
            self.total_weight,
        )?;
        if let Some(capacity) = self.capacity {
            write!(f, " of {capacity}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the selection algorithms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("Arithmetic fault ranking item {index}: cannot divide value {value} by weight {weight}")]
    Arithmetic {
        index: usize,
        weight: Decimal,
        value: Decimal,
    },

    #[error("Malformed item {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    #[error("Running total overflowed after {steps} steps")]
    Overflow { steps: usize },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
