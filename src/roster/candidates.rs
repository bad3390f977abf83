use std::collections::HashSet;

use super::availability::AvailabilityTable;
use super::ledger::FairnessLedger;
use super::types::DayType;

/// Available people for `day`, minus `exclude`, least-served first.
///
/// The sort is stable: people with equal counts stay in availability-sheet
/// order, which keeps repeated runs on the same inputs identical.
pub fn eligible(
    day: DayType,
    table: &AvailabilityTable,
    exclude: &[&str],
    ledger: &FairnessLedger,
) -> Vec<String> {
    let excluded: HashSet<&str> = exclude.iter().copied().collect();

    let mut candidates: Vec<String> = table
        .available_on(day)
        .iter()
        .filter(|name| !excluded.contains(name.as_str()))
        .cloned()
        .collect();

    sort_by_load(&mut candidates, ledger);
    candidates
}

/// Stable ascending sort by working-ledger count
pub fn sort_by_load(names: &mut [String], ledger: &FairnessLedger) {
    names.sort_by_key(|name| ledger.get(name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::Ledger;

    fn table(names: &[&str]) -> AvailabilityTable {
        let mut table = AvailabilityTable::default();
        for name in names {
            table.push(DayType::Tuesday, *name);
        }
        table
    }

    #[test]
    fn sorts_by_count_keeping_sheet_order_for_ties() {
        let persisted = Ledger::from([
            ("A".to_string(), 2),
            ("B".to_string(), 1),
            ("D".to_string(), 1),
        ]);
        let ledger = FairnessLedger::seed(&persisted);

        let result = eligible(DayType::Tuesday, &table(&["A", "B", "C", "D"]), &[], &ledger);

        assert_eq!(result, ["C", "B", "D", "A"]);
    }

    #[test]
    fn excluded_names_are_removed() {
        let ledger = FairnessLedger::default();
        let result = eligible(DayType::Tuesday, &table(&["A", "B", "C"]), &["B", ""], &ledger);
        assert_eq!(result, ["A", "C"]);
    }

    #[test]
    fn unknown_day_yields_nothing() {
        let ledger = FairnessLedger::default();
        assert!(eligible(DayType::Friday, &table(&["A"]), &[], &ledger).is_empty());
    }
}
