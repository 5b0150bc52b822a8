//! Random asset datasets for trying the selectors on inputs of a chosen size.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::asset::Asset;
use crate::data::rng::SeededRng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MIN_COST: f64 = 10.0;
const MIN_PROFIT_PCT: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub count: usize,
    pub max_cost: f64,
    pub max_profit_pct: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 20,
            max_cost: 1000.0,
            max_profit_pct: 20.0,
        }
    }
}

/// `count` assets named `Share-XXX` with cost in `[10, max_cost]` and profit
/// in `[0.1, max_profit_pct]`, both rounded to cents. Ids may repeat.
pub fn generate_assets(config: &GeneratorConfig, seed: u64) -> Vec<Asset> {
    let mut rng = SeededRng::from_seed(seed);
    let max_cost = config.max_cost.max(MIN_COST);
    let max_profit = config.max_profit_pct.max(MIN_PROFIT_PCT);

    (0..config.count)
        .map(|_| {
            let suffix: String = (0..3)
                .map(|_| ID_ALPHABET[rng.index(ID_ALPHABET.len())] as char)
                .collect();
            let cost = round_cents(rng.uniform(MIN_COST, max_cost));
            let profit_pct = round_cents(rng.uniform(MIN_PROFIT_PCT, max_profit));
            Asset::new(format!("Share-{suffix}"), cost, profit_pct)
        })
        .collect()
}

/// Write assets in the comma convention, without a header row.
pub fn write_assets_csv(path: impl AsRef<Path>, assets: &[Asset]) -> Result<(), csv::Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for asset in assets {
        writer.serialize(asset)?;
    }
    writer.flush()?;
    info!(path = %path.display(), count = assets.len(), "wrote generated assets");
    Ok(())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_assets;

    #[test]
    fn same_seed_same_dataset() {
        let config = GeneratorConfig::default();
        assert_eq!(generate_assets(&config, 9), generate_assets(&config, 9));
        assert_ne!(generate_assets(&config, 9), generate_assets(&config, 10));
    }

    #[test]
    fn generated_assets_are_eligible_and_bounded() {
        let config = GeneratorConfig {
            count: 200,
            max_cost: 500.0,
            max_profit_pct: 15.0,
        };
        let assets = generate_assets(&config, 3);
        assert_eq!(assets.len(), 200);
        for asset in &assets {
            assert!(asset.is_eligible());
            assert!(asset.cost >= MIN_COST && asset.cost <= 500.0);
            assert!(asset.profit_pct >= MIN_PROFIT_PCT && asset.profit_pct <= 15.0);
            assert!(asset.id.starts_with("Share-") && asset.id.len() == 9);
        }
    }

    #[test]
    fn written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("generated.csv");
        let assets = generate_assets(&GeneratorConfig::default(), 1);
        write_assets_csv(&path, &assets).unwrap();

        let report = load_assets(&path).unwrap();
        assert!(report.dropped.is_empty());
        assert!(!report.header_skipped);
        assert_eq!(report.assets, assets);
    }
}
