use tracing::debug;

use super::availability::AvailabilityIndex;
use super::candidates::eligible;
use super::ledger::FairnessLedger;
use super::pairing::{select_pair, select_second_with_preference};
use super::types::{Ledger, Slot, SlotResult, SlotState};

/// Completes schedule slots against one working ledger.
///
/// Slots are handled in the order given, so a pick made for an earlier slot
/// raises that person's count before later slots are considered. The
/// working ledger lives only as long as the engine.
pub struct AssignmentEngine<'a> {
    index: &'a AvailabilityIndex,
    ledger: FairnessLedger,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(index: &'a AvailabilityIndex, persisted: &Ledger) -> Self {
        Self {
            index,
            ledger: FairnessLedger::seed(persisted),
        }
    }

    pub fn ledger(&self) -> &FairnessLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> FairnessLedger {
        self.ledger
    }

    /// Returns one result per slot that received at least one new name.
    /// Filled slots and slots with nobody available produce no result.
    pub fn fill(&mut self, slots: &[Slot]) -> Vec<SlotResult> {
        slots.iter().filter_map(|slot| self.complete(slot)).collect()
    }

    pub fn complete(&mut self, slot: &Slot) -> Option<SlotResult> {
        let state = slot.state();
        if state == SlotState::Filled {
            return None;
        }

        let fixed = slot.fixed_names();
        let candidates = eligible(slot.day, &self.index.availability, &fixed, &self.ledger);
        if candidates.is_empty() {
            debug!(row = slot.row, day = %slot.day, "no eligible volunteers");
            return None;
        }

        let partners = &self.index.partners;
        let result = match state {
            SlotState::Empty => {
                let pair = select_pair(&candidates, partners, &mut self.ledger)?;
                let picked = pair.names();
                SlotResult {
                    row: slot.row,
                    names: picked.clone(),
                    picked,
                }
            }
            SlotState::HalfFilled(existing) => {
                let second =
                    select_second_with_preference(existing, &candidates, partners, &mut self.ledger)?;
                SlotResult {
                    row: slot.row,
                    names: vec![existing.to_string(), second.clone()],
                    picked: vec![second],
                }
            }
            SlotState::Filled => return None,
        };

        let counts: Vec<u32> = result.picked.iter().map(|n| self.ledger.get(n)).collect();
        debug!(
            row = slot.row,
            day = %slot.day,
            names = ?result.names,
            counts = ?counts,
            "slot completed"
        );
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::{AvailabilityRecord, DayType};

    fn index() -> AvailabilityIndex {
        AvailabilityIndex::build(&[
            AvailabilityRecord {
                name: "A".into(),
                tuesday: "yes".into(),
                friday: "yes".into(),
                ..Default::default()
            },
            AvailabilityRecord {
                name: "B".into(),
                tuesday: "yes".into(),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn filled_slots_are_left_alone() {
        let index = index();
        let mut engine = AssignmentEngine::new(&index, &Ledger::new());
        let slot = Slot::new(2, DayType::Tuesday, Some("X"), Some("Y"));

        assert!(engine.fill(&[slot]).is_empty());
        assert!(engine.ledger().counts().is_empty());
    }

    #[test]
    fn half_filled_slot_never_repeats_the_fixed_name() {
        let index = index();
        let mut engine = AssignmentEngine::new(&index, &Ledger::new());
        let slot = Slot::new(2, DayType::Tuesday, None, Some("A"));

        let results = engine.fill(&[slot]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].names, ["A", "B"]);
        assert_eq!(results[0].picked, ["B"]);
    }

    #[test]
    fn half_filled_slot_with_no_one_else_is_skipped() {
        let index = index();
        let mut engine = AssignmentEngine::new(&index, &Ledger::new());
        let slot = Slot::new(2, DayType::Friday, Some("A"), None);

        assert!(engine.fill(&[slot]).is_empty());
        assert_eq!(engine.ledger().get("A"), 0);
    }
}
