//! Selection engine — ratio ranking, step-limited and capacity-bounded picks.

pub mod capacity;
pub mod greedy;

use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{info, warn};

use crate::types::{InputPolicy, Item, SelectError, Selection};

pub use capacity::select_within_capacity;
pub use greedy::{select, select_in_place};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Selector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Maximum number of items to pick (K).
    pub step_limit: usize,
    /// Whether inputs are validated before ranking.
    pub policy: InputPolicy,
    /// Optional weight budget. `None` means count-limited only.
    pub capacity: Option<Decimal>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            step_limit: 2,
            policy: InputPolicy::Lenient,
            capacity: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Front door for callers that hold a configuration.
///
/// Applies the input policy, dispatches to the step-limited or
/// capacity-bounded algorithm, and logs each run with its duration.
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Access the selector configuration.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Run one selection over `items`.
    pub fn run(&self, items: &[Item]) -> Result<Selection, SelectError> {
        let started = Instant::now();

        if self.config.policy == InputPolicy::Strict {
            if let Err(e) = check_items(items) {
                warn!(error = %e, "Input rejected");
                return Err(e);
            }
        }

        let result = match self.config.capacity {
            Some(capacity) => select_within_capacity(items, capacity, self.config.step_limit),
            None => select(items, self.config.step_limit),
        };

        let selection = match result {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, items = items.len(), "Selection failed");
                return Err(e);
            }
        };

        debug_assert!(selection.steps() <= self.config.step_limit.min(items.len()));

        info!(
            items = items.len(),
            step_limit = self.config.step_limit,
            capacity = ?self.config.capacity,
            policy = %self.config.policy,
            steps = selection.steps(),
            total_value = %selection.total_value,
            elapsed = ?started.elapsed(),
            "Selection complete"
        );

        Ok(selection)
    }
}

/// Strict-policy pre-condition: every weight positive, no negative value.
fn check_items(items: &[Item]) -> Result<(), SelectError> {
    for (index, item) in items.iter().enumerate() {
        if item.weight <= Decimal::ZERO {
            return Err(SelectError::MalformedInput {
                index,
                reason: format!("weight must be positive, got {}", item.weight),
            });
        }
        if item.value < Decimal::ZERO {
            return Err(SelectError::MalformedInput {
                index,
                reason: format!("value must not be negative, got {}", item.value),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference() -> Vec<Item> {
        [(5, 10), (4, 40), (6, 30), (3, 50)]
            .into_iter()
            .map(Item::from)
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.step_limit, 2);
        assert_eq!(config.policy, InputPolicy::Lenient);
        assert!(config.capacity.is_none());
    }

    #[test]
    fn test_run_reference() {
        let selector = Selector::new(SelectorConfig::default());
        let s = selector.run(&reference()).unwrap();
        assert_eq!(s.total_value, dec!(90));
    }

    #[test]
    fn test_run_with_capacity() {
        let selector = Selector::new(SelectorConfig {
            step_limit: 4,
            capacity: Some(dec!(6)),
            ..SelectorConfig::default()
        });
        let s = selector.run(&reference()).unwrap();
        assert_eq!(s.picked, vec![3]);
    }

    #[test]
    fn test_lenient_zero_weight_is_arithmetic_fault() {
        let selector = Selector::new(SelectorConfig::default());
        let err = selector.run(&[Item::from((0, 10))]).unwrap_err();
        assert!(matches!(err, SelectError::Arithmetic { index: 0, .. }));
    }

    #[test]
    fn test_strict_zero_weight_is_malformed() {
        let selector = Selector::new(SelectorConfig {
            policy: InputPolicy::Strict,
            ..SelectorConfig::default()
        });
        let err = selector.run(&[Item::from((0, 10))]).unwrap_err();
        assert!(matches!(err, SelectError::MalformedInput { index: 0, .. }));
    }

    #[test]
    fn test_strict_rejects_negative_value() {
        let selector = Selector::new(SelectorConfig {
            policy: InputPolicy::Strict,
            ..SelectorConfig::default()
        });
        let err = selector
            .run(&[Item::from((1, 1)), Item::from((2, -5))])
            .unwrap_err();
        match err {
            SelectError::MalformedInput { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("value"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_allows_zero_value() {
        let selector = Selector::new(SelectorConfig {
            policy: InputPolicy::Strict,
            ..SelectorConfig::default()
        });
        let s = selector.run(&[Item::from((1, 0))]).unwrap();
        assert_eq!(s.total_value, Decimal::ZERO);
        assert_eq!(s.steps(), 1);
    }

    #[test]
    fn test_lenient_accepts_negative_weight() {
        let selector = Selector::new(SelectorConfig::default());
        assert!(selector.run(&[Item::from((-2, 4))]).is_ok());
    }
}
