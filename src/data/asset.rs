//! Asset record shared by the loader, the selectors and the report writer.

use serde::{Deserialize, Serialize};

/// An investable asset. `profit_pct` is the expected return in percent of `cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub cost: f64,
    pub profit_pct: f64,
}

impl Asset {
    pub fn new(id: impl Into<String>, cost: f64, profit_pct: f64) -> Self {
        Self {
            id: id.into(),
            cost,
            profit_pct,
        }
    }

    /// Expected profit in currency units.
    #[inline]
    pub fn profit(&self) -> f64 {
        self.cost * self.profit_pct / 100.0
    }

    /// Profit per unit of cost. Only meaningful for eligible assets.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.profit() / self.cost
    }

    /// Eligible assets have a finite, strictly positive cost and profit percentage.
    pub fn is_eligible(&self) -> bool {
        self.ineligibility().is_none()
    }

    /// Why the asset is not eligible, or None when it is.
    pub fn ineligibility(&self) -> Option<&'static str> {
        if !self.cost.is_finite() {
            Some("cost is not a finite number")
        } else if !self.profit_pct.is_finite() {
            Some("profit_pct is not a finite number")
        } else if self.cost <= 0.0 {
            Some("cost is not positive")
        } else if self.profit_pct <= 0.0 {
            Some("profit_pct is not positive")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_and_ratio_derive_from_cost_and_percentage() {
        let asset = Asset::new("A", 200.0, 5.0);
        assert_eq!(asset.profit(), 10.0);
        assert_eq!(asset.ratio(), 0.05);
    }

    #[test]
    fn non_positive_or_nan_fields_are_ineligible() {
        assert!(Asset::new("ok", 1.0, 1.0).is_eligible());
        assert!(!Asset::new("zero_cost", 0.0, 3.0).is_eligible());
        assert!(!Asset::new("neg_pct", 10.0, -1.0).is_eligible());
        assert!(!Asset::new("nan", f64::NAN, 1.0).is_eligible());
        assert_eq!(
            Asset::new("zero_pct", 10.0, 0.0).ineligibility(),
            Some("profit_pct is not positive")
        );
        assert_eq!(Asset::new("ok", 1.0, 1.0).ineligibility(), None);
    }
}
