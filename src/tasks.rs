use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::calendar::{next_service_dates, ServiceDate};
use crate::config::RosterConfig;
use crate::display::write_schedule_to_file;
use crate::error::{Result, RosterError};
use crate::parser::{load_availability, load_ledger, load_schedule};
use crate::roster::{AssignmentEngine, AvailabilityIndex, AvailabilityRecord, Ledger, SlotResult};
use crate::runlog::{append_entry, format_timestamp, LoggedUpdate};
use crate::workbook::ScheduleSheet;

pub const FILL_ACTION: &str = "Filled Missing Assignments";

#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    pub timestamp: String,
    pub results: Vec<SlotResult>,
    /// Whether a row was appended to the log sheet
    pub logged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtendReport {
    pub timestamp: String,
    pub last_date: NaiveDate,
    pub added: Vec<ServiceDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub extended: Option<ExtendReport>,
    pub filled: FillReport,
}

fn now_stamp(config: &RosterConfig) -> Result<String> {
    format_timestamp(Utc::now(), &config.timezone, &config.timestamp_format)
}

/// Completes every slot in `sheet` that is missing one or both names.
///
/// The persisted ledger is only read; picks accumulate in a working copy
/// that is dropped when this returns.
pub fn fill_sheet(
    sheet: &mut ScheduleSheet,
    records: &[AvailabilityRecord],
    ledger: &Ledger,
) -> Vec<SlotResult> {
    let index = AvailabilityIndex::build(records);
    let mut engine = AssignmentEngine::new(&index, ledger);
    let results = engine.fill(&sheet.slots());
    sheet.apply(&results);
    results
}

/// Appends one service-date row per upcoming Tuesday, Thursday and Friday
/// after the last dated row.
pub fn extend_sheet(sheet: &mut ScheduleSheet, window_days: u32) -> Result<(NaiveDate, Vec<ServiceDate>)> {
    if sheet.rows.is_empty() {
        return Err(RosterError::EmptySchedule);
    }
    let (last_index, last_date) = sheet.last_dated().ok_or(RosterError::NoValidDate)?;

    let dates = next_service_dates(last_date, window_days);
    if !dates.is_empty() {
        sheet.extend_after(last_index, &dates);
    }
    Ok((last_date, dates))
}

/// Fills missing assignments in the schedule sheet and logs the run.
///
/// All three input sheets are loaded before anything is assigned, so a
/// missing sheet aborts the run without touching the schedule.
pub fn fill_missing_assignments(config: &RosterConfig) -> Result<FillReport> {
    let timestamp = now_stamp(config)?;

    let records = load_availability(&config.availability_path())?;
    let schedule_path = config.schedule_path();
    let mut sheet = load_schedule(&schedule_path)?;
    let ledger = load_ledger(&config.ledger_path())?;

    let results = fill_sheet(&mut sheet, &records, &ledger);

    sheet.set_last_updated(&timestamp);
    write_schedule_to_file(&sheet, &schedule_path)?;

    let updates: Vec<LoggedUpdate> = results
        .iter()
        .map(|r| LoggedUpdate {
            row: r.row,
            who: r.names.clone(),
        })
        .collect();
    let logged = append_entry(&config.log_path(), &timestamp, FILL_ACTION, &updates)?;

    info!(slots = results.len(), logged, "filled missing assignments");
    Ok(FillReport {
        timestamp,
        results,
        logged,
    })
}

/// Extends the schedule sheet by `window_days` past its last dated row.
pub fn extend_schedule(config: &RosterConfig, window_days: u32) -> Result<ExtendReport> {
    let timestamp = now_stamp(config)?;
    let schedule_path = config.schedule_path();
    let mut sheet = load_schedule(&schedule_path)?;

    let (last_date, added) = extend_sheet(&mut sheet, window_days)?;
    info!(last_date = %last_date, added = added.len(), "extending schedule");

    if !added.is_empty() {
        sheet.set_last_updated(&timestamp);
        write_schedule_to_file(&sheet, &schedule_path)?;
    }

    Ok(ExtendReport {
        timestamp,
        last_date,
        added,
    })
}

/// Extends the calendar, then fills whatever is missing.
///
/// A schedule with nothing to extend from is not fatal here; the fill
/// still runs over the existing rows.
pub fn run_schedule(config: &RosterConfig) -> Result<RunReport> {
    let extended = match extend_schedule(config, config.window_days) {
        Ok(report) => Some(report),
        Err(err @ (RosterError::EmptySchedule | RosterError::NoValidDate)) => {
            warn!(error = %err, "schedule not extended");
            None
        }
        Err(err) => return Err(err),
    };

    let filled = fill_missing_assignments(config)?;
    Ok(RunReport { extended, filled })
}
