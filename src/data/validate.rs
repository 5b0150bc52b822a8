use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::data::loader::LoadReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check a loaded dataset before running selectors on it.
///
/// Dropped rows and duplicate ids are warnings: the run can still proceed.
/// An empty eligible set is an error. Exceeding `max_exhaustive_assets` is
/// reported as info since only the exhaustive selector refuses such inputs.
pub fn validate_assets(load: &LoadReport, max_exhaustive_assets: usize) -> ValidationReport {
    let mut report = ValidationReport::default();

    for dropped in &load.dropped {
        report.push(
            ValidationSeverity::Warning,
            format!("line {}", dropped.line),
            format!("record '{}' dropped: {}", dropped.id, dropped.reason),
        );
    }

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (index, asset) in load.assets.iter().enumerate() {
        if let Some(first) = first_seen.get(asset.id.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                format!("asset[{index}]"),
                format!("duplicate id '{}' (first seen at asset[{first}])", asset.id),
            );
        } else {
            first_seen.insert(asset.id.as_str(), index);
        }
    }

    if load.assets.is_empty() {
        report.push(
            ValidationSeverity::Error,
            "dataset",
            "no eligible asset (positive cost and profit) was loaded",
        );
    } else if load.assets.len() > max_exhaustive_assets {
        report.push(
            ValidationSeverity::Info,
            "dataset",
            format!(
                "{} assets exceed the exhaustive search limit of {}; only greedy will run",
                load.assets.len(),
                max_exhaustive_assets
            ),
        );
    }

    report
}
