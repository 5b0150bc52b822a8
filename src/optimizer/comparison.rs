//! Run one or both selectors over the same input and measure them.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::data::asset::Asset;
use crate::optimizer::{
    validate_budget, Algorithm, AlgorithmChoice, SelectionError, SelectionResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    #[serde(flatten)]
    pub result: SelectionResult,
}

/// Deltas between the exhaustive optimum and the greedy result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Exhaustive time minus greedy time.
    pub time_delta_secs: f64,
    /// Exhaustive time over greedy time; None when greedy time rounds to zero.
    pub speedup: Option<f64>,
    /// Optimality gap: exhaustive profit minus greedy profit.
    pub profit_delta: f64,
    pub cost_delta: f64,
}

impl Comparison {
    pub fn between(exhaustive: &AlgorithmRun, greedy: &AlgorithmRun) -> Self {
        let exhaustive_secs = exhaustive.elapsed.as_secs_f64();
        let greedy_secs = greedy.elapsed.as_secs_f64();
        Self {
            time_delta_secs: exhaustive_secs - greedy_secs,
            speedup: (greedy_secs > 0.0).then(|| exhaustive_secs / greedy_secs),
            profit_delta: exhaustive.result.total_profit - greedy.result.total_profit,
            cost_delta: exhaustive.result.total_cost - greedy.result.total_cost,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonReport {
    pub budget: f64,
    pub asset_count: usize,
    pub runs: BTreeMap<Algorithm, AlgorithmRun>,
    /// Selectors that refused the input (size guard), with the reason.
    pub skipped: BTreeMap<Algorithm, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl ComparisonReport {
    pub fn run(&self, algorithm: Algorithm) -> Option<&AlgorithmRun> {
        self.runs.get(&algorithm)
    }
}

/// Run the selectors named by `choice` in sequence.
///
/// An invalid budget fails the whole call. A selector refusing its input only
/// lands in [ComparisonReport::skipped] so the other one still runs.
pub fn compare(
    assets: &[Asset],
    budget: f64,
    choice: AlgorithmChoice,
    max_exhaustive_assets: usize,
) -> Result<ComparisonReport, SelectionError> {
    validate_budget(budget)?;

    let mut report = ComparisonReport {
        budget,
        asset_count: assets.len(),
        ..ComparisonReport::default()
    };

    for &algorithm in choice.algorithms() {
        let started = Instant::now();
        let outcome = algorithm.select(assets, budget, max_exhaustive_assets);
        let elapsed = started.elapsed();
        match outcome {
            Ok(result) => {
                info!(
                    %algorithm,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    selected = result.len(),
                    total_cost = result.total_cost,
                    total_profit = result.total_profit,
                    "selector finished"
                );
                report.runs.insert(
                    algorithm,
                    AlgorithmRun {
                        algorithm,
                        elapsed,
                        result,
                    },
                );
            }
            Err(err @ SelectionError::TooManyAssets { .. }) => {
                warn!(%algorithm, error = %err, "selector skipped");
                report.skipped.insert(algorithm, err.to_string());
            }
            Err(err) => return Err(err),
        }
    }

    if let (Some(exhaustive), Some(greedy)) = (
        report.runs.get(&Algorithm::Exhaustive),
        report.runs.get(&Algorithm::Greedy),
    ) {
        report.comparison = Some(Comparison::between(exhaustive, greedy));
    }

    Ok(report)
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}
