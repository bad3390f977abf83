use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Persisted service counts, keyed by volunteer name
pub type Ledger = HashMap<String, u32>;

/// Recurring service days tracked by the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayType {
    Tuesday,
    Thursday,
    Friday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Tuesday, DayType::Thursday, DayType::Friday];

    pub fn name(self) -> &'static str {
        match self {
            DayType::Tuesday => "Tuesday",
            DayType::Thursday => "Thursday",
            DayType::Friday => "Friday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Option<DayType> {
        match weekday {
            Weekday::Tue => Some(DayType::Tuesday),
            Weekday::Thu => Some(DayType::Thursday),
            Weekday::Fri => Some(DayType::Friday),
            _ => None,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayType::Tuesday => Weekday::Tue,
            DayType::Thursday => Weekday::Thu,
            DayType::Friday => Weekday::Fri,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DayType::ALL
            .into_iter()
            .find(|day| day.name().to_lowercase() == lower)
            .ok_or_else(|| format!("not a service day: {}", s.trim()))
    }
}

/// One row of the availability sheet, with cells kept as raw text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub name: String,
    pub tuesday: String,
    pub thursday: String,
    pub friday: String,
    pub partners: String,
}

impl AvailabilityRecord {
    pub fn flag(&self, day: DayType) -> &str {
        match day {
            DayType::Tuesday => &self.tuesday,
            DayType::Thursday => &self.thursday,
            DayType::Friday => &self.friday,
        }
    }
}

/// A schedule row awaiting completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// 1-based sheet row, header included
    pub row: usize,
    pub day: DayType,
    pub first: Option<String>,
    pub second: Option<String>,
}

/// How much of a slot is already assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState<'a> {
    Empty,
    HalfFilled(&'a str),
    Filled,
}

impl Slot {
    pub fn new(row: usize, day: DayType, first: Option<&str>, second: Option<&str>) -> Self {
        Self {
            row,
            day,
            first: normalize_name(first),
            second: normalize_name(second),
        }
    }

    pub fn state(&self) -> SlotState<'_> {
        match (self.first.as_deref(), self.second.as_deref()) {
            (Some(_), Some(_)) => SlotState::Filled,
            (Some(fixed), None) | (None, Some(fixed)) => SlotState::HalfFilled(fixed),
            (None, None) => SlotState::Empty,
        }
    }

    pub fn fixed_names(&self) -> Vec<&str> {
        self.first.iter().chain(self.second.iter()).map(String::as_str).collect()
    }

    /// Writes newly picked names into the blank cells, first cell first.
    pub fn apply(&mut self, result: &SlotResult) {
        let mut picks = result.picked.iter();
        for cell in [&mut self.first, &mut self.second] {
            if cell.is_none() {
                match picks.next() {
                    Some(name) => *cell = Some(name.clone()),
                    None => break,
                }
            }
        }
    }
}

/// The outcome of completing one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    pub row: usize,
    /// Every name on the slot after completion, fixed names first
    pub names: Vec<String>,
    /// Only the names chosen during this run
    pub picked: Vec<String>,
}

fn normalize_name(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
