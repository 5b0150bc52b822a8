//! Ratio-greedy heuristic: sort by profit per unit of cost, then take every
//! asset that still fits. O(N log N), always feasible, not always optimal.

use tracing::debug;

use crate::data::asset::Asset;
use crate::optimizer::{
    eligible_assets, ratio_order, validate_budget, Algorithm, SelectionError, SelectionResult,
};

pub fn select_greedy(assets: &[Asset], budget: f64) -> Result<SelectionResult, SelectionError> {
    validate_budget(budget)?;
    let assets = eligible_assets(assets, Algorithm::Greedy);
    if assets.is_empty() {
        return Ok(SelectionResult::empty());
    }

    let mut result = SelectionResult::empty();
    for index in ratio_order(&assets) {
        let asset = &assets[index];
        if result.total_cost + asset.cost <= budget {
            result.total_cost += asset.cost;
            result.total_profit += asset.profit();
            result.selected.push(asset.clone());
        }
    }

    debug!(
        assets = assets.len(),
        selected = result.len(),
        budget,
        "greedy selection finished"
    );
    Ok(result)
}
