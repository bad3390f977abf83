use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::roster::DayType;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// A generated service date, ready to become a schedule row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDate {
    pub date: NaiveDate,
    pub day: DayType,
}

impl ServiceDate {
    /// Full month name, e.g. "October"
    pub fn month_name(&self) -> String {
        self.date.format("%B").to_string()
    }

    /// Unpadded M/D/YYYY
    pub fn formatted_date(&self) -> String {
        format_date(self.date)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Parses the date formats that show up in schedule sheets.
///
/// Tries ISO dates, RFC 3339 and plain date-times, US month/day/year with
/// either separator, then a spreadsheet serial day number.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(stamp.date());
        }
    }

    parse_serial(value)
}

// Spreadsheet serial dates count days from 1899-12-30.
fn parse_serial(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.parse().ok()?;
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::try_days(serial.floor() as i64)?)
}

/// Every Tuesday, Thursday and Friday from the day after `last` through
/// `window_days` days beyond that, inclusive.
pub fn next_service_dates(last: NaiveDate, window_days: u32) -> Vec<ServiceDate> {
    let Some(start) = last.succ_opt() else {
        return Vec::new();
    };
    let Some(end) = start.checked_add_signed(Duration::days(i64::from(window_days))) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter_map(|date| {
            DayType::from_weekday(date.weekday()).map(|day| ServiceDate { date, day })
        })
        .collect()
}
