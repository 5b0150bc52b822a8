//! Exhaustive subset search: the exact optimum, used as ground truth for the
//! greedy heuristic.
//!
//! Every non-empty subset is visited, smallest subsets first and, within a
//! size, in lexicographic index order. A subset replaces the current best only
//! when its profit is strictly greater, so the first subset found wins ties.
//! Work is 2^N subsets; inputs beyond roughly 20-25 assets are impractical, and
//! the selector refuses anything above its configured limit instead of
//! truncating the input.
//!
//! Subset totals are summed in greedy ratio order rather than index order, so a
//! set the greedy walk accepts gets bit-identical totals here and can never
//! look cheaper or more profitable to greedy than to this search.

use tracing::debug;

use crate::data::asset::Asset;
use crate::optimizer::{
    eligible_assets, ratio_order, validate_budget, Algorithm, SelectionError, SelectionResult,
};

/// Largest input the exhaustive selector accepts unless configured otherwise.
pub const DEFAULT_MAX_EXHAUSTIVE_ASSETS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSelector {
    max_assets: usize,
}

impl Default for ExhaustiveSelector {
    fn default() -> Self {
        Self {
            max_assets: DEFAULT_MAX_EXHAUSTIVE_ASSETS,
        }
    }
}

impl ExhaustiveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_assets: usize) -> Self {
        Self { max_assets }
    }

    pub fn limit(&self) -> usize {
        self.max_assets
    }

    pub fn select(&self, assets: &[Asset], budget: f64) -> Result<SelectionResult, SelectionError> {
        validate_budget(budget)?;
        let assets = eligible_assets(assets, Algorithm::Exhaustive);
        let n = assets.len();
        if n > self.max_assets {
            return Err(SelectionError::TooManyAssets {
                count: n,
                limit: self.max_assets,
            });
        }

        let mut rank = vec![0usize; n];
        for (position, index) in ratio_order(&assets).into_iter().enumerate() {
            rank[index] = position;
        }

        let mut best: Option<Vec<usize>> = None;
        let mut best_cost = 0.0;
        let mut best_profit = 0.0;
        let mut indices: Vec<usize> = Vec::with_capacity(n);
        let mut ranked: Vec<usize> = Vec::with_capacity(n);
        let mut evaluated: u64 = 0;

        for size in 1..=n {
            indices.clear();
            indices.extend(0..size);
            loop {
                evaluated += 1;
                ranked.clear();
                ranked.extend_from_slice(&indices);
                ranked.sort_unstable_by_key(|&i| rank[i]);
                let cost = ranked.iter().fold(0.0, |sum, &i| sum + assets[i].cost);
                if cost <= budget {
                    let profit = ranked.iter().fold(0.0, |sum, &i| sum + assets[i].profit());
                    if profit > best_profit {
                        best_profit = profit;
                        best_cost = cost;
                        best = Some(indices.clone());
                    }
                }
                if !next_combination(&mut indices, n) {
                    break;
                }
            }
        }

        debug!(assets = n, evaluated, budget, "exhaustive search finished");

        let Some(best) = best else {
            return Ok(SelectionResult::empty());
        };
        Ok(SelectionResult {
            selected: best.into_iter().map(|i| assets[i].clone()).collect(),
            total_cost: best_cost,
            total_profit: best_profit,
        })
    }
}

/// Exact optimum with the default size limit.
pub fn select_exhaustive(assets: &[Asset], budget: f64) -> Result<SelectionResult, SelectionError> {
    ExhaustiveSelector::default().select(assets, budget)
}

/// Advance `indices` (strictly increasing, values < n) to the next combination
/// of the same size in lexicographic order. Returns false after the last one.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] < n - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
