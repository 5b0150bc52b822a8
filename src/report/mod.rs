//! Human-readable rendering of selection results: result files and console tables.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::optimizer::{Algorithm, AlgorithmRun, ComparisonReport, SelectionResult};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write result file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn render_selection(result: &SelectionResult) -> String {
    if result.is_empty() {
        return "No asset selected within the budget.\n".to_string();
    }

    let mut out = String::from("=== Selected assets ===\n");
    for asset in &result.selected {
        let _ = writeln!(
            out,
            "{} - cost: {:.2} - profit: {:.2}%",
            asset.id, asset.cost, asset.profit_pct
        );
    }
    out.push_str("\n=== Summary ===\n");
    let _ = writeln!(out, "Total cost: {}", format_amount(result.total_cost));
    let _ = writeln!(
        out,
        "Total profit after 2 years: {}",
        format_amount(result.total_profit)
    );
    let _ = writeln!(out, "Selected assets: {}", result.len());
    out
}

/// Write [render_selection] output, creating missing parent directories.
pub fn write_selection(
    path: impl AsRef<Path>,
    result: &SelectionResult,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let to_error = |source: std::io::Error| ReportError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, render_selection(result)).map_err(to_error)?;
    info!(path = %path.display(), selected = result.len(), "wrote result file");
    Ok(())
}

/// `<algorithm>_<input stem>_result.txt`
pub fn result_file_name(algorithm: Algorithm, input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "assets".to_string());
    format!("{algorithm}_{stem}_result.txt")
}

pub fn result_path(output_dir: &Path, algorithm: Algorithm, input: &Path) -> PathBuf {
    output_dir.join(result_file_name(algorithm, input))
}

pub fn render_run_summary(run: &AlgorithmRun) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Algorithm: {}", run.algorithm);
    let _ = writeln!(out, "  Elapsed: {:.4} s", run.elapsed.as_secs_f64());
    let _ = writeln!(out, "  Total cost: {}", format_amount(run.result.total_cost));
    let _ = writeln!(out, "  Total profit: {}", format_amount(run.result.total_profit));
    let _ = writeln!(out, "  Selected assets: {}", run.result.len());
    out
}

pub fn render_comparison_table(report: &ComparisonReport) -> String {
    let mut out = String::from("=== Algorithm comparison ===\n");
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<15} {:<15} {:<8}",
        "Algorithm", "Time (s)", "Cost", "Profit", "Assets"
    );
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for run in report.runs.values() {
        let _ = writeln!(
            out,
            "{:<12} {:<12.4} {:<15} {:<15} {:<8}",
            run.algorithm.as_str(),
            run.elapsed.as_secs_f64(),
            format_amount(run.result.total_cost),
            format_amount(run.result.total_profit),
            run.result.len()
        );
    }
    for (algorithm, reason) in &report.skipped {
        let _ = writeln!(out, "{:<12} skipped: {reason}", algorithm.as_str());
    }

    if let Some(comparison) = &report.comparison {
        match comparison.speedup {
            Some(speedup) => {
                let _ = writeln!(
                    out,
                    "Time delta: {:.4} s (greedy x{speedup:.1} faster)",
                    comparison.time_delta_secs
                );
            }
            None => {
                let _ = writeln!(out, "Time delta: {:.4} s", comparison.time_delta_secs);
            }
        }
        let _ = writeln!(
            out,
            "Profit delta (optimality gap): {}",
            format_amount(comparison.profit_delta)
        );
    }
    out
}

pub fn render_json(report: &ComparisonReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Two decimals with `,` digit grouping: `1234567.891` -> `1,234,567.89`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}
