pub mod comparison;
pub mod exhaustive;
pub mod greedy;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::data::asset::Asset;

pub use comparison::{compare, AlgorithmRun, Comparison, ComparisonReport};
pub use exhaustive::{select_exhaustive, ExhaustiveSelector, DEFAULT_MAX_EXHAUSTIVE_ASSETS};
pub use greedy::select_greedy;

/// Budget used when neither the config file, the environment nor the CLI sets one.
pub const DEFAULT_BUDGET: f64 = 500_000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Run-level parameter the selectors cannot work with (negative or NaN budget).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Exhaustive search refused an input larger than its configured limit.
    #[error("exhaustive search limited to {limit} assets, got {count}")]
    TooManyAssets { count: usize, limit: usize },
}

/// Which selector produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Exhaustive,
    Greedy,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::Greedy => "greedy",
        }
    }

    pub fn select(
        &self,
        assets: &[Asset],
        budget: f64,
        max_exhaustive_assets: usize,
    ) -> Result<SelectionResult, SelectionError> {
        match self {
            Self::Exhaustive => {
                ExhaustiveSelector::with_limit(max_exhaustive_assets).select(assets, budget)
            }
            Self::Greedy => select_greedy(assets, budget),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which selectors a comparison run should invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmChoice {
    Exhaustive,
    Greedy,
    #[default]
    Both,
}

impl AlgorithmChoice {
    /// Selectors in execution order.
    pub fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            Self::Exhaustive => &[Algorithm::Exhaustive],
            Self::Greedy => &[Algorithm::Greedy],
            Self::Both => &[Algorithm::Exhaustive, Algorithm::Greedy],
        }
    }
}

/// Chosen assets with their summed cost and profit.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionResult {
    pub selected: Vec<Asset>,
    pub total_cost: f64,
    pub total_profit: f64,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.selected.iter().map(|asset| asset.id.as_str()).collect()
    }
}

pub(crate) fn validate_budget(budget: f64) -> Result<(), SelectionError> {
    if budget.is_nan() {
        return Err(SelectionError::InvalidInput("budget is not a number".to_string()));
    }
    if budget < 0.0 {
        return Err(SelectionError::InvalidInput(format!(
            "budget must be non-negative, got {budget}"
        )));
    }
    Ok(())
}

/// Drop ineligible assets with a warning each. Borrows the input untouched
/// when everything is eligible.
pub(crate) fn eligible_assets<'a>(assets: &'a [Asset], selector: Algorithm) -> Cow<'a, [Asset]> {
    if assets.iter().all(Asset::is_eligible) {
        return Cow::Borrowed(assets);
    }
    let kept = assets
        .iter()
        .filter(|asset| match asset.ineligibility() {
            None => true,
            Some(reason) => {
                warn!(%selector, id = %asset.id, reason, "skipping ineligible asset");
                false
            }
        })
        .cloned()
        .collect::<Vec<_>>();
    Cow::Owned(kept)
}

/// Indices of `assets` by descending profit/cost ratio. The sort is stable, so
/// equal ratios keep input order. Both selectors sum totals in this order, which
/// keeps their float totals identical for the same set of assets.
pub(crate) fn ratio_order(assets: &[Asset]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..assets.len()).collect();
    order.sort_by(|&left, &right| assets[right].ratio().total_cmp(&assets[left].ratio()));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_order_is_descending_and_stable() {
        let assets = vec![
            Asset::new("low", 100.0, 1.0),
            Asset::new("tie-a", 10.0, 5.0),
            Asset::new("high", 10.0, 9.0),
            Asset::new("tie-b", 20.0, 5.0),
        ];
        assert_eq!(ratio_order(&assets), vec![2, 1, 3, 0]);
    }

    #[test]
    fn negative_and_nan_budgets_are_invalid_input() {
        assert!(matches!(validate_budget(-0.01), Err(SelectionError::InvalidInput(_))));
        assert!(matches!(validate_budget(f64::NAN), Err(SelectionError::InvalidInput(_))));
        assert_eq!(validate_budget(0.0), Ok(()));
        assert_eq!(validate_budget(f64::INFINITY), Ok(()));
    }

    #[test]
    fn eligible_assets_borrows_clean_input() {
        let assets = vec![Asset::new("A", 1.0, 1.0)];
        assert!(matches!(eligible_assets(&assets, Algorithm::Greedy), Cow::Borrowed(_)));

        let mixed = vec![Asset::new("A", 1.0, 1.0), Asset::new("B", 0.0, 1.0)];
        let kept = eligible_assets(&mixed, Algorithm::Greedy);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "A");
    }

    #[test]
    fn choice_expands_in_execution_order() {
        assert_eq!(
            AlgorithmChoice::Both.algorithms(),
            &[Algorithm::Exhaustive, Algorithm::Greedy]
        );
        assert_eq!(AlgorithmChoice::default(), AlgorithmChoice::Both);
    }
}
