use std::collections::HashMap;

use super::types::Ledger;

/// Working copy of service counts for a single run.
///
/// Counts only ever go up, so every name stays at or above its persisted
/// count until the run ends and the copy is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FairnessLedger {
    counts: HashMap<String, u32>,
}

impl FairnessLedger {
    pub fn seed(persisted: &Ledger) -> Self {
        Self {
            counts: persisted.clone(),
        }
    }

    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// How many times `name` was picked since the ledger was seeded
    pub fn picks_since(&self, persisted: &Ledger, name: &str) -> u32 {
        self.get(name)
            .saturating_sub(persisted.get(name).copied().unwrap_or(0))
    }

    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }
}
