pub mod types;
pub mod availability;
pub mod ledger;
pub mod candidates;
pub mod pairing;
pub mod engine;

pub use types::{AvailabilityRecord, DayType, Ledger, Slot, SlotResult, SlotState};
pub use availability::{AvailabilityIndex, AvailabilityTable, PartnerPreferences};
pub use ledger::FairnessLedger;
pub use candidates::eligible;
pub use pairing::{choose_complement, select_pair, select_second_with_preference, Pair};
pub use engine::AssignmentEngine;
