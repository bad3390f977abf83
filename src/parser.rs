use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::{Result, RosterError};
use crate::roster::{AvailabilityRecord, Ledger};
use crate::workbook::{ScheduleRow, ScheduleSheet};

fn require(table: &'static str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RosterError::MissingInputTable {
            table,
            path: path.to_path_buf(),
        })
    }
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?)
}

fn cell(record: &StringRecord, col: usize) -> String {
    record.get(col).unwrap_or("").to_string()
}

/// Finds a header column by case-insensitive substring, skipping headers that
/// contain `unless`
fn find_column(headers: &StringRecord, needle: &str, unless: Option<&str>, fallback: usize) -> usize {
    headers
        .iter()
        .map(|h| h.to_lowercase())
        .position(|h| h.contains(needle) && unless.map_or(true, |u| !h.contains(u)))
        .unwrap_or(fallback)
}

/// Loads the availability sheet.
///
/// Columns are located from the header row; any header that can't be matched
/// falls back to the usual position (name, Tuesday, Thursday, Friday,
/// partners). Cells are kept raw, and interpretation happens when the index
/// is built.
pub fn load_availability(path: &Path) -> Result<Vec<AvailabilityRecord>> {
    require("availability", path)?;
    let mut reader = reader(path)?;

    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, "name", Some("partner"), 0);
    let tuesday_col = find_column(&headers, "tue", None, 1);
    let thursday_col = find_column(&headers, "thu", None, 2);
    let friday_col = find_column(&headers, "fri", None, 3);
    let partners_col = find_column(&headers, "partner", None, 4);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(AvailabilityRecord {
            name: cell(&record, name_col),
            tuesday: cell(&record, tuesday_col),
            thursday: cell(&record, thursday_col),
            friday: cell(&record, friday_col),
            partners: cell(&record, partners_col),
        });
    }

    Ok(records)
}

/// Loads persisted service counts as `name -> count`.
///
/// Rows with a blank name are ignored. Rows whose count is not a
/// non-negative whole number are skipped with a warning.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    require("ledger", path)?;
    let mut reader = reader(path)?;

    let mut ledger = Ledger::new();
    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        let raw = record.get(1).unwrap_or("").trim();
        match parse_count(raw) {
            Some(count) => {
                ledger.insert(name.to_string(), count);
            }
            None => warn!(name, count = raw, "skipping ledger row with invalid count"),
        }
    }

    Ok(ledger)
}

fn parse_count(raw: &str) -> Option<u32> {
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

/// Loads the schedule sheet, keeping every cell as written.
pub fn load_schedule(path: &Path) -> Result<ScheduleSheet> {
    require("schedule", path)?;
    let mut reader = reader(path)?;

    let mut sheet = ScheduleSheet {
        header: reader.headers()?.iter().map(str::to_string).collect(),
        rows: Vec::new(),
    };
    if sheet.header.iter().all(|h| h.trim().is_empty()) {
        sheet.header = ScheduleSheet::default().header;
    }

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(index + 2);
        sheet
            .rows
            .push(ScheduleRow::new(row, record.iter().map(str::to_string).collect()));
    }

    Ok(sheet)
}
