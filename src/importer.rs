//! Punch-sheet ingestion (text/JSON).
//!
//! Upstream spreadsheet parsing is out of scope; this module consumes the
//! already-extracted per-day punch rows. Dirty rows are logged and skipped,
//! never fatal: punch-clock exports are routinely malformed and one bad line
//! must not sink the batch.

use crate::error::{AppError, Result};
use crate::models::RawPunchSet;
use crate::timeutil::ClockTime;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Load punch rows from a file (auto-detect format by extension).
pub fn load_punches(path: &Path) -> Result<Vec<RawPunchSet>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_format(&content)
    } else {
        parse_text_format(&content)
    }
}

/// Parse tab-separated punch rows.
///
/// Format: `employee_id \t YYYY-MM-DD \t HH:MM \t HH:MM ...`
/// Blank lines and `#` comments are ignored. Rows for the same
/// (employee, date) are merged into one punch set.
pub fn parse_text_format(text: &str) -> Result<Vec<RawPunchSet>> {
    let mut grouped: BTreeMap<(String, NaiveDate), Vec<String>> = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 2 {
            warn!("Skipping short line: {line}");
            continue;
        }

        let employee_id = parts[0].trim();
        if employee_id.is_empty() {
            warn!("Skipping line with empty employee id: {line}");
            continue;
        }

        let date = match NaiveDate::parse_from_str(parts[1].trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                warn!("Invalid date in line: {line}");
                continue;
            }
        };

        let punches = grouped.entry((employee_id.to_string(), date)).or_default();
        for raw in &parts[2..] {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            // Keep the raw string; the interpreter drops what it cannot
            // parse. Warn here so dirty sources are visible in the logs.
            if ClockTime::parse_lenient(raw).is_none() {
                warn!("Malformed punch '{raw}' in line: {line}");
            }
            punches.push(raw.to_string());
        }
    }

    Ok(grouped
        .into_iter()
        .map(|((employee_id, date), punches)| RawPunchSet {
            employee_id,
            date,
            punches,
        })
        .collect())
}

/// Parse a JSON array of punch sets.
pub fn parse_json_format(text: &str) -> Result<Vec<RawPunchSet>> {
    serde_json::from_str(text).map_err(|e| AppError::import(format!("Invalid punch JSON: {e}")))
}
