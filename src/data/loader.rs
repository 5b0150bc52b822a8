//! Load assets from headerless three-column CSV files (`id, cost, profit_pct`).
//!
//! Two conventions are accepted and detected from the first non-empty line:
//! `;` separated with `,` decimals (spreadsheet exports in European locales) and
//! `,` separated with `.` decimals. Rows that cannot produce an eligible asset are
//! dropped and reported; they never abort the load.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::asset::Asset;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read asset file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV framing: {0}")]
    Csv(#[from] csv::Error),
}

/// Field separator / decimal mark pairing of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsvConvention {
    /// `id;cost;profit_pct` with `,` as decimal mark.
    Semicolon,
    /// `id,cost,profit_pct` with `.` as decimal mark.
    Comma,
}

impl CsvConvention {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Semicolon => b';',
            Self::Comma => b',',
        }
    }
}

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DropReason {
    MissingField { field: &'static str },
    Unparsable { field: &'static str, value: String },
    NonPositive { field: &'static str, value: f64 },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing {field}"),
            Self::Unparsable { field, value } => write!(f, "unparsable {field} '{value}'"),
            Self::NonPositive { field, value } => write!(f, "non-positive {field} {value}"),
        }
    }
}

/// A row that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    pub line: u64,
    pub id: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub convention: CsvConvention,
    pub header_skipped: bool,
    pub assets: Vec<Asset>,
    pub dropped: Vec<MalformedRecord>,
}

pub fn load_assets(path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let report = parse_assets(&raw)?;
    debug!(
        path = %path.display(),
        assets = report.assets.len(),
        dropped = report.dropped.len(),
        "loaded asset file"
    );
    Ok(report)
}

pub fn parse_assets(raw: &str) -> Result<LoadReport, LoadError> {
    let convention = detect_convention(raw);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(convention.delimiter())
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut report = LoadReport {
        convention,
        header_skipped: false,
        assets: Vec::new(),
        dropped: Vec::new(),
    };
    let mut seen_data_row = false;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        let first_row = !seen_data_row;
        seen_data_row = true;

        if first_row && looks_like_header(&record) {
            debug!(line, "skipping header row");
            report.header_skipped = true;
            continue;
        }

        match parse_row(&record) {
            Ok(asset) => report.assets.push(asset),
            Err(reason) => {
                let id = record.get(0).unwrap_or_default().to_string();
                warn!(line, id = %id, %reason, "dropping malformed asset record");
                report.dropped.push(MalformedRecord { line, id, reason });
            }
        }
    }

    Ok(report)
}

/// `;` wins when it splits the first non-empty line into at least three fields.
pub fn detect_convention(raw: &str) -> CsvConvention {
    let first_line = raw.lines().map(str::trim).find(|line| !line.is_empty());
    match first_line {
        Some(line) if line.split(';').count() >= 3 => CsvConvention::Semicolon,
        _ => CsvConvention::Comma,
    }
}

/// Strip percent signs and digit-group spaces, and accept `,` as a decimal mark.
pub fn clean_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '%' | ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn looks_like_header(record: &csv::StringRecord) -> bool {
    let cost = record.get(1).unwrap_or_default();
    let profit = record.get(2).unwrap_or_default();
    !cost.is_empty()
        && !profit.is_empty()
        && clean_number(cost).is_none()
        && clean_number(profit).is_none()
}

fn parse_row(record: &csv::StringRecord) -> Result<Asset, DropReason> {
    let id = match record.get(0) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(DropReason::MissingField { field: "id" }),
    };
    let cost = parse_positive(record.get(1), "cost")?;
    let profit_pct = parse_positive(record.get(2), "profit_pct")?;
    Ok(Asset::new(id, cost, profit_pct))
}

fn parse_positive(raw: Option<&str>, field: &'static str) -> Result<f64, DropReason> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(DropReason::MissingField { field }),
    };
    let value = clean_number(raw).ok_or_else(|| DropReason::Unparsable {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(DropReason::Unparsable {
            field,
            value: raw.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(DropReason::NonPositive { field, value });
    }
    Ok(value)
}
