use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{parse_date, ServiceDate};
use crate::roster::{DayType, Slot, SlotResult};

pub const MONTH_COL: usize = 0;
pub const DATE_COL: usize = 1;
pub const DAY_COL: usize = 2;
pub const FIRST_COL: usize = 3;
pub const SECOND_COL: usize = 4;
/// Header cell that carries the time of the last run
pub const LAST_UPDATED_COL: usize = 5;

pub const DEFAULT_HEADER: [&str; 6] = ["Month", "Date", "Day", "Who", "Who", "Last Updated"];

/// One schedule row with its cells kept as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// 1-based sheet row, header is row 1
    pub row: usize,
    pub cells: Vec<String>,
}

impl ScheduleRow {
    pub fn new(row: usize, cells: Vec<String>) -> Self {
        Self { row, cells }
    }

    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map(String::as_str).unwrap_or("").trim()
    }

    pub fn set(&mut self, col: usize, value: impl Into<String>) {
        if self.cells.len() <= col {
            self.cells.resize(col + 1, String::new());
        }
        self.cells[col] = value.into();
    }

    /// A row is a slot when it has a date and a recognised service day
    pub fn slot(&self) -> Option<Slot> {
        if self.cell(DATE_COL).is_empty() {
            return None;
        }
        let day: DayType = self.cell(DAY_COL).parse().ok()?;
        Some(Slot::new(
            self.row,
            day,
            Some(self.cell(FIRST_COL)),
            Some(self.cell(SECOND_COL)),
        ))
    }
}

/// The "final schedule" sheet: header plus rows in sheet order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSheet {
    pub header: Vec<String>,
    pub rows: Vec<ScheduleRow>,
}

impl Default for ScheduleSheet {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

impl ScheduleSheet {
    pub fn slots(&self) -> Vec<Slot> {
        self.rows.iter().filter_map(ScheduleRow::slot).collect()
    }

    /// Writes each result's picks into the blank name cells of its row.
    pub fn apply(&mut self, results: &[SlotResult]) {
        for result in results {
            let Some(row) = self.rows.iter_mut().find(|r| r.row == result.row) else {
                continue;
            };
            let Some(mut slot) = row.slot() else {
                continue;
            };
            slot.apply(result);
            row.set(FIRST_COL, slot.first.unwrap_or_default());
            row.set(SECOND_COL, slot.second.unwrap_or_default());
        }
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.header
            .get(LAST_UPDATED_COL)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    pub fn set_last_updated(&mut self, timestamp: &str) {
        if self.header.len() <= LAST_UPDATED_COL {
            self.header.resize(LAST_UPDATED_COL + 1, String::new());
        }
        self.header[LAST_UPDATED_COL] = timestamp.to_string();
    }

    /// Index and date of the bottom-most row whose date parses
    pub fn last_dated(&self) -> Option<(usize, NaiveDate)> {
        self.rows
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, row)| parse_date(row.cell(DATE_COL)).map(|date| (i, date)))
    }

    /// Replaces anything after row `after` with one blank-assignment row per date.
    pub fn extend_after(&mut self, after: usize, dates: &[ServiceDate]) {
        self.rows.truncate(after + 1);
        let mut next_row = self.rows.last().map(|r| r.row + 1).unwrap_or(2);

        for date in dates {
            let cells = vec![
                date.month_name(),
                date.formatted_date(),
                date.day.name().to_string(),
                String::new(),
                String::new(),
            ];
            self.rows.push(ScheduleRow::new(next_row, cells));
            next_row += 1;
        }
    }
}
