//! Selector behaviour on the reference scenarios plus randomized properties:
//! feasibility, local optimality of the exhaustive result, greedy never beating
//! the exhaustive optimum, and determinism.

use folio::data::Asset;
use folio::optimizer::{
    compare, select_exhaustive, select_greedy, Algorithm, AlgorithmChoice, SelectionError,
    SelectionResult,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn asset(id: &str, cost: f64, profit_pct: f64) -> Asset {
    Asset::new(id, cost, profit_pct)
}

#[test]
fn greedy_matches_optimum_when_ratios_line_up() {
    let assets = vec![
        asset("A", 100.0, 10.0),
        asset("B", 200.0, 5.0),
        asset("C", 150.0, 8.0),
    ];
    let exhaustive = select_exhaustive(&assets, 250.0).unwrap();
    let greedy = select_greedy(&assets, 250.0).unwrap();

    assert_eq!(exhaustive.ids(), vec!["A", "C"]);
    assert_eq!(greedy.ids(), vec!["A", "C"]);
    assert_eq!(exhaustive.total_cost, 250.0);
    assert!((exhaustive.total_profit - 22.0).abs() < EPSILON);
    assert!((greedy.total_profit - exhaustive.total_profit).abs() < EPSILON);
}

#[test]
fn greedy_falls_short_when_best_ratio_blocks_the_budget() {
    let assets = vec![
        asset("X", 300.0, 34.0),
        asset("Y", 200.0, 30.0),
        asset("Z", 200.0, 30.0),
    ];
    let exhaustive = select_exhaustive(&assets, 400.0).unwrap();
    let greedy = select_greedy(&assets, 400.0).unwrap();

    assert_eq!(exhaustive.ids(), vec!["Y", "Z"]);
    assert_eq!(exhaustive.total_cost, 400.0);
    assert!((exhaustive.total_profit - 120.0).abs() < EPSILON);

    assert_eq!(greedy.ids(), vec!["X"]);
    assert_eq!(greedy.total_cost, 300.0);
    assert!((greedy.total_profit - 102.0).abs() < EPSILON);
    assert!(greedy.total_profit < exhaustive.total_profit);
}

#[test]
fn zero_budget_selects_nothing() {
    let assets: Vec<Asset> = (1..=12)
        .map(|i| asset(&format!("S{i}"), i as f64 * 10.0, 5.0))
        .collect();
    assert_eq!(select_exhaustive(&assets, 0.0).unwrap(), SelectionResult::empty());
    assert_eq!(select_greedy(&assets, 0.0).unwrap(), SelectionResult::empty());
}

#[test]
fn single_asset_costing_the_whole_budget_is_selected() {
    let assets = vec![asset("ONLY", 500_000.0, 7.5)];
    for result in [
        select_exhaustive(&assets, 500_000.0).unwrap(),
        select_greedy(&assets, 500_000.0).unwrap(),
    ] {
        assert_eq!(result.ids(), vec!["ONLY"]);
        assert_eq!(result.total_cost, 500_000.0);
        assert!((result.total_profit - 37_500.0).abs() < EPSILON);
    }
}

#[test]
fn negative_budget_is_invalid_for_every_entry_point() {
    let assets = vec![asset("A", 1.0, 1.0)];
    assert!(matches!(
        select_exhaustive(&assets, -1.0),
        Err(SelectionError::InvalidInput(_))
    ));
    assert!(matches!(
        select_greedy(&assets, -1.0),
        Err(SelectionError::InvalidInput(_))
    ));
    assert!(matches!(
        compare(&assets, -1.0, AlgorithmChoice::Both, 25),
        Err(SelectionError::InvalidInput(_))
    ));
}

#[test]
fn cent_valued_budget_filled_exactly_by_greedy_is_found_by_exhaustive() {
    let assets = vec![asset("a", 0.1, 1.0), asset("b", 0.2, 2.0), asset("c", 0.3, 3.0)];
    let exhaustive = select_exhaustive(&assets, 0.6).unwrap();
    let greedy = select_greedy(&assets, 0.6).unwrap();

    assert_eq!(greedy.ids(), vec!["c", "b", "a"]);
    assert_eq!(exhaustive.ids(), vec!["a", "b", "c"]);
    assert!(greedy.total_profit <= exhaustive.total_profit);
    assert_eq!(exhaustive.total_cost, greedy.total_cost);
}

#[test]
fn comparison_quantifies_the_gap() {
    let assets = vec![
        asset("X", 300.0, 34.0),
        asset("Y", 200.0, 30.0),
        asset("Z", 200.0, 30.0),
    ];
    let report = compare(&assets, 400.0, AlgorithmChoice::Both, 25).unwrap();
    let exhaustive = report.run(Algorithm::Exhaustive).unwrap();
    let greedy = report.run(Algorithm::Greedy).unwrap();
    let comparison = report.comparison.unwrap();

    assert_eq!(exhaustive.result.ids(), vec!["Y", "Z"]);
    assert_eq!(greedy.result.ids(), vec!["X"]);
    assert!((comparison.profit_delta - 18.0).abs() < EPSILON);
    let expected_delta = exhaustive.elapsed.as_secs_f64() - greedy.elapsed.as_secs_f64();
    assert!((comparison.time_delta_secs - expected_delta).abs() < EPSILON);
}

/// Cent-valued costs and percentages with two decimals, like real CSV exports.
fn arb_assets(max_len: usize) -> impl Strategy<Value = Vec<Asset>> {
    prop::collection::vec((1u32..=50_000, 1u32..=4_000), 0..=max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, pct))| {
                Asset::new(format!("A{i}"), cents as f64 / 100.0, pct as f64 / 100.0)
            })
            .collect()
    })
}

fn arb_budget() -> impl Strategy<Value = f64> {
    (0u32..=150_000).prop_map(|cents| cents as f64 / 100.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn exhaustive_is_feasible_and_locally_optimal(
        assets in arb_assets(10),
        budget in arb_budget(),
    ) {
        let result = select_exhaustive(&assets, budget).unwrap();
        prop_assert!(result.total_cost <= budget);

        let remaining = budget - result.total_cost;
        let mut chosen = result.ids();
        for candidate in &assets {
            if let Some(pos) = chosen.iter().position(|id| *id == candidate.id) {
                chosen.remove(pos);
                continue;
            }
            prop_assert!(
                candidate.cost > remaining - EPSILON,
                "{} (cost {}) still fits in {}",
                candidate.id,
                candidate.cost,
                remaining
            );
        }
    }

    #[test]
    fn greedy_is_feasible_and_never_beats_exhaustive(
        assets in arb_assets(10),
        budget in arb_budget(),
    ) {
        let exhaustive = select_exhaustive(&assets, budget).unwrap();
        let greedy = select_greedy(&assets, budget).unwrap();
        prop_assert!(greedy.total_cost <= budget);
        prop_assert!(greedy.total_profit <= exhaustive.total_profit);
    }

    #[test]
    fn selectors_are_deterministic(
        assets in arb_assets(9),
        budget in arb_budget(),
    ) {
        prop_assert_eq!(
            select_exhaustive(&assets, budget).unwrap(),
            select_exhaustive(&assets, budget).unwrap()
        );
        prop_assert_eq!(
            select_greedy(&assets, budget).unwrap(),
            select_greedy(&assets, budget).unwrap()
        );
    }

    #[test]
    fn zero_budget_is_always_empty(assets in arb_assets(12)) {
        prop_assert!(select_exhaustive(&assets, 0.0).unwrap().is_empty());
        prop_assert!(select_greedy(&assets, 0.0).unwrap().is_empty());
    }
}
