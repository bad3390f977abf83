use serde::Serialize;

use super::availability::PartnerPreferences;
use super::candidates::sort_by_load;
use super::ledger::FairnessLedger;

/// Two people picked for a fresh slot; `second` is empty when only one
/// candidate was available
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub first: String,
    pub second: Option<String>,
}

impl Pair {
    pub fn names(&self) -> Vec<String> {
        std::iter::once(self.first.clone())
            .chain(self.second.clone())
            .collect()
    }
}

/// Picks a partner for `anchor` from candidates sorted least-served first.
///
/// Anyone whose count is within one of the lowest candidate is inside the
/// fairness bound. If the anchor prefers someone inside the bound, the
/// least-served such partner wins. Otherwise the lowest candidate is
/// returned.
pub fn choose_complement(
    anchor: &str,
    ordered: &[String],
    partners: &PartnerPreferences,
    ledger: &FairnessLedger,
) -> Option<String> {
    let lowest = ordered.first()?;
    let max_allowed = ledger.get(lowest) + 1;

    if let Some(preferred) = partners.preferred(anchor) {
        let mut within_bound: Vec<String> = ordered
            .iter()
            .filter(|name| ledger.get(name) <= max_allowed)
            .filter(|name| preferred.contains(*name))
            .cloned()
            .collect();
        sort_by_load(&mut within_bound, ledger);

        if let Some(partner) = within_bound.into_iter().next() {
            return Some(partner);
        }
    }

    Some(lowest.clone())
}

/// Fills an empty slot: lowest count first, then the best complement for them.
///
/// Both picks are counted in `ledger` before returning.
pub fn select_pair(
    ordered: &[String],
    partners: &PartnerPreferences,
    ledger: &mut FairnessLedger,
) -> Option<Pair> {
    let first = ordered.first()?.clone();
    ledger.increment(&first);

    let mut remaining: Vec<String> = ordered[1..]
        .iter()
        .filter(|name| **name != first)
        .cloned()
        .collect();
    sort_by_load(&mut remaining, ledger);

    let second = choose_complement(&first, &remaining, partners, ledger);
    if let Some(name) = &second {
        ledger.increment(name);
    }

    Some(Pair { first, second })
}

/// Completes a slot that already has `existing` assigned
pub fn select_second_with_preference(
    existing: &str,
    ordered: &[String],
    partners: &PartnerPreferences,
    ledger: &mut FairnessLedger,
) -> Option<String> {
    let second = choose_complement(existing, ordered, partners, ledger)?;
    ledger.increment(&second);
    Some(second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::Ledger;

    fn ledger(counts: &[(&str, u32)]) -> FairnessLedger {
        let persisted: Ledger = counts.iter().map(|(n, c)| (n.to_string(), *c)).collect();
        FairnessLedger::seed(&persisted)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn prefers(anchor: &str, list: &[&str]) -> PartnerPreferences {
        let mut partners = PartnerPreferences::default();
        partners.insert(anchor, names(list));
        partners
    }

    #[test]
    fn complement_of_nothing_is_none() {
        let ledger = FairnessLedger::default();
        assert_eq!(choose_complement("A", &[], &PartnerPreferences::default(), &ledger), None);
    }

    #[test]
    fn preferred_partner_one_ahead_is_allowed() {
        let ledger = ledger(&[("B", 0), ("C", 1)]);
        let pick = choose_complement("A", &names(&["B", "C"]), &prefers("A", &["C"]), &ledger);
        assert_eq!(pick.as_deref(), Some("C"));
    }

    #[test]
    fn preferred_partner_two_ahead_loses_to_fairness() {
        let ledger = ledger(&[("B", 0), ("C", 2)]);
        let pick = choose_complement("A", &names(&["B", "C"]), &prefers("A", &["C"]), &ledger);
        assert_eq!(pick.as_deref(), Some("B"));
    }

    #[test]
    fn least_served_preferred_partner_wins_regardless_of_rank() {
        let ledger = ledger(&[("B", 0), ("C", 1), ("D", 0)]);
        let pick = choose_complement(
            "A",
            &names(&["B", "D", "C"]),
            &prefers("A", &["C", "D"]),
            &ledger,
        );
        assert_eq!(pick.as_deref(), Some("D"));
    }

    #[test]
    fn select_pair_counts_both_picks() {
        let mut ledger = ledger(&[("A", 2), ("B", 0), ("C", 1)]);
        let pair = select_pair(
            &names(&["B", "C", "A"]),
            &PartnerPreferences::default(),
            &mut ledger,
        );

        assert_eq!(
            pair,
            Some(Pair {
                first: "B".into(),
                second: Some("C".into())
            })
        );
        assert_eq!(ledger.get("B"), 1);
        assert_eq!(ledger.get("C"), 2);
        assert_eq!(ledger.get("A"), 2);
    }

    #[test]
    fn select_pair_with_one_candidate_leaves_second_empty() {
        let mut ledger = FairnessLedger::default();
        let pair = select_pair(&names(&["A"]), &PartnerPreferences::default(), &mut ledger)
            .expect("one candidate is enough for a first pick");

        assert_eq!(pair.names(), ["A"]);
        assert_eq!(ledger.get("A"), 1);
    }

    #[test]
    fn select_pair_never_pairs_someone_with_themselves() {
        let mut ledger = FairnessLedger::default();
        let pair = select_pair(&names(&["A", "A"]), &PartnerPreferences::default(), &mut ledger)
            .expect("first pick");
        assert_eq!(pair.second, None);
    }

    #[test]
    fn select_second_counts_the_pick() {
        let mut ledger = ledger(&[("B", 0), ("C", 0)]);
        let pick = select_second_with_preference(
            "A",
            &names(&["B", "C"]),
            &prefers("A", &["C"]),
            &mut ledger,
        );

        assert_eq!(pick.as_deref(), Some("C"));
        assert_eq!(ledger.get("C"), 1);
        assert_eq!(ledger.get("A"), 0);
    }
}
