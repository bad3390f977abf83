//! Engine scenarios: fresh pairs, partner preference inside and outside the
//! fairness bound, half-filled completion, and empty days.

use service_roster::roster::{
    AssignmentEngine, AvailabilityIndex, AvailabilityRecord, DayType, Ledger, Slot,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tuesday_volunteer(name: &str, partners: &str) -> AvailabilityRecord {
    AvailabilityRecord {
        name: name.to_string(),
        tuesday: "yes".to_string(),
        partners: partners.to_string(),
        ..Default::default()
    }
}

fn ledger(counts: &[(&str, u32)]) -> Ledger {
    counts.iter().map(|(n, c)| (n.to_string(), *c)).collect()
}

fn tuesday(row: usize, first: Option<&str>, second: Option<&str>) -> Slot {
    Slot::new(row, DayType::Tuesday, first, second)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn lowest_count_first_then_next_lowest() {
    let index = AvailabilityIndex::build(&[
        tuesday_volunteer("A", ""),
        tuesday_volunteer("B", ""),
        tuesday_volunteer("C", ""),
    ]);
    let persisted = ledger(&[("A", 2), ("B", 0), ("C", 1)]);

    let mut engine = AssignmentEngine::new(&index, &persisted);
    let results = engine.fill(&[tuesday(2, None, None)]);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].names, ["B", "C"]);
    assert_eq!(engine.ledger().get("B"), 1);
    assert_eq!(engine.ledger().get("C"), 2);
    assert_eq!(engine.ledger().get("A"), 2);
}

#[test]
fn preferred_partner_outside_bound_falls_back_to_fairness() {
    let index = AvailabilityIndex::build(&[
        tuesday_volunteer("A", "C"),
        tuesday_volunteer("B", ""),
        tuesday_volunteer("C", ""),
    ]);
    let persisted = ledger(&[("A", 0), ("B", 0), ("C", 5)]);

    let mut engine = AssignmentEngine::new(&index, &persisted);
    let results = engine.fill(&[tuesday(2, None, None)]);

    assert_eq!(results[0].names, ["A", "B"]);
}

#[test]
fn preferred_partner_inside_bound_completes_half_filled_slot() {
    let index = AvailabilityIndex::build(&[
        tuesday_volunteer("A", "C"),
        tuesday_volunteer("B", ""),
        tuesday_volunteer("C", ""),
    ]);
    let persisted = ledger(&[("B", 0), ("C", 0)]);

    let mut engine = AssignmentEngine::new(&index, &persisted);
    let results = engine.fill(&[tuesday(2, Some("A"), None)]);

    assert_eq!(results[0].names, ["A", "C"]);
    assert_eq!(results[0].picked, ["C"]);
    assert_eq!(engine.ledger().get("A"), 0);
}

#[test]
fn empty_day_is_skipped_and_run_continues() {
    let index = AvailabilityIndex::build(&[tuesday_volunteer("A", ""), tuesday_volunteer("B", "")]);
    let slots = [
        Slot::new(2, DayType::Friday, None, None),
        Slot::new(3, DayType::Thursday, Some("A"), None),
        tuesday(4, None, None),
    ];

    let mut engine = AssignmentEngine::new(&index, &Ledger::new());
    let results = engine.fill(&slots);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 4);
    assert_eq!(results[0].names, ["A", "B"]);
}

// ---------------------------------------------------------------------------
// Multi-slot behaviour
// ---------------------------------------------------------------------------

/// Earlier picks raise counts, so the next slot on the same day rotates to
/// whoever has served least.
#[test]
fn consecutive_slots_rotate_through_the_pool() {
    let index = AvailabilityIndex::build(&[
        tuesday_volunteer("A", ""),
        tuesday_volunteer("B", ""),
        tuesday_volunteer("C", ""),
        tuesday_volunteer("D", ""),
    ]);

    let mut engine = AssignmentEngine::new(&index, &Ledger::new());
    let results = engine.fill(&[tuesday(2, None, None), tuesday(3, None, None), tuesday(4, None, None)]);

    assert_eq!(results[0].names, ["A", "B"]);
    assert_eq!(results[1].names, ["C", "D"]);
    assert_eq!(results[2].names, ["A", "B"]);
}

#[test]
fn single_volunteer_fills_only_first_cell() {
    let index = AvailabilityIndex::build(&[tuesday_volunteer("A", "")]);

    let mut engine = AssignmentEngine::new(&index, &Ledger::new());
    let results = engine.fill(&[tuesday(2, None, None)]);

    assert_eq!(results[0].names, ["A"]);

    let mut slot = tuesday(2, None, None);
    slot.apply(&results[0]);
    assert_eq!(slot.first.as_deref(), Some("A"));
    assert_eq!(slot.second, None);
}

#[test]
fn fixed_second_cell_is_treated_like_a_fixed_first() {
    let index = AvailabilityIndex::build(&[
        tuesday_volunteer("A", ""),
        tuesday_volunteer("B", ""),
    ]);

    let mut engine = AssignmentEngine::new(&index, &Ledger::new());
    let results = engine.fill(&[tuesday(2, None, Some("B"))]);

    assert_eq!(results[0].names, ["B", "A"]);

    let mut slot = tuesday(2, None, Some("B"));
    slot.apply(&results[0]);
    assert_eq!(slot.first.as_deref(), Some("A"));
    assert_eq!(slot.second.as_deref(), Some("B"));
}

#[test]
fn fixed_name_outside_the_pool_still_gets_a_partner() {
    let index = AvailabilityIndex::build(&[tuesday_volunteer("A", "")]);

    let mut engine = AssignmentEngine::new(&index, &Ledger::new());
    let results = engine.fill(&[tuesday(2, Some("Guest"), None)]);

    assert_eq!(results[0].names, ["Guest", "A"]);
    assert_eq!(engine.ledger().get("Guest"), 0);
}
