use std::fs::OpenOptions;
use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, RosterError};

/// Formats `now` in `timezone` using a strftime `format`
pub fn format_timestamp(now: DateTime<Utc>, timezone: &str, format: &str) -> Result<String> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| RosterError::UnknownTimezone(timezone.to_string()))?;
    Ok(now.with_timezone(&tz).format(format).to_string())
}

/// One entry of the "Filled Missing Assignments" log details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedUpdate {
    pub row: usize,
    pub who: Vec<String>,
}

/// Appends `[timestamp, action, json(details)]` to the log sheet.
///
/// The log is optional: nothing is written, and `false` is returned, when
/// the sheet does not already exist.
pub fn append_entry<T: Serialize>(
    path: &Path,
    timestamp: &str,
    action: &str,
    details: &T,
) -> Result<bool> {
    if !path.is_file() {
        debug!(path = %path.display(), "no log sheet, skipping run log");
        return Ok(false);
    }

    let details = serde_json::to_string(details)?;
    let file = OpenOptions::new().append(true).open(path)?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
    wtr.write_record([timestamp, action, details.as_str()])?;
    wtr.flush()?;
    Ok(true)
}
