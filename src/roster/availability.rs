use std::collections::HashMap;

use super::types::{AvailabilityRecord, DayType};

/// People available on each service day, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityTable {
    days: HashMap<DayType, Vec<String>>,
}

impl AvailabilityTable {
    /// Returns an empty slice for a day nobody signed up for
    pub fn available_on(&self, day: DayType) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, day: DayType, name: impl Into<String>) {
        self.days.entry(day).or_default().push(name.into());
    }
}

/// Preferred partners per person, most preferred first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerPreferences {
    partners: HashMap<String, Vec<String>>,
}

impl PartnerPreferences {
    pub fn preferred(&self, name: &str) -> Option<&[String]> {
        self.partners.get(name).map(Vec::as_slice)
    }

    pub fn insert(&mut self, name: impl Into<String>, partners: Vec<String>) {
        self.partners.insert(name.into(), partners);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    pub availability: AvailabilityTable,
    pub partners: PartnerPreferences,
    pub people: Vec<String>,
}

impl AvailabilityIndex {
    /// Builds the day and partner views from raw availability records.
    ///
    /// Records without a name are skipped. A day counts only when its cell
    /// reads "yes" (any case, surrounding whitespace ignored). Partner cells
    /// are split on commas and kept in the order given.
    pub fn build(records: &[AvailabilityRecord]) -> Self {
        let mut index = AvailabilityIndex::default();

        for record in records {
            let name = record.name.trim();
            if name.is_empty() {
                continue;
            }
            index.people.push(name.to_string());

            for day in DayType::ALL {
                if is_yes(record.flag(day)) {
                    index.availability.push(day, name);
                }
            }

            let partners = record.partners.trim();
            if !partners.is_empty() {
                let list = partners.split(',').map(|p| p.trim().to_string()).collect();
                index.partners.insert(name, list);
            }
        }

        index
    }
}

fn is_yes(value: &str) -> bool {
    value.trim().to_lowercase() == "yes"
}
