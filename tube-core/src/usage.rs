//! Per-session usage counters.

use crate::station::{name_key, Catalog};
use std::collections::HashMap;

/// How many times each station has been correctly guessed this session.
///
/// Keys are case-insensitive station names. A station with no entry counts
/// as unused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageState {
    counts: HashMap<String, u32>,
}

impl UsageState {
    /// Fresh state with every catalog station at zero.
    pub fn new(catalog: &Catalog) -> Self {
        let counts = catalog
            .iter()
            .map(|station| (name_key(&station.name), 0))
            .collect();
        Self { counts }
    }

    /// Current count for a station, zero if never recorded.
    pub fn times_used(&self, name: &str) -> u32 {
        self.counts.get(&name_key(name)).copied().unwrap_or(0)
    }

    /// Overwrite the count for a station.
    pub fn set(&mut self, name: &str, times_used: u32) {
        self.counts.insert(name_key(name), times_used);
    }

    /// Add one use and return the new count.
    pub fn increment(&mut self, name: &str) -> u32 {
        let count = self.counts.entry(name_key(name)).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Number of stations used at least once.
    pub fn used_count(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    /// Total of all counts.
    pub fn total_uses(&self) -> u32 {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{LineInfo, Station};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Station::new("Oxford Circus", vec![LineInfo::new("Central line")], "1"),
            Station::new("Stratford", vec![LineInfo::new("Jubilee line")], "2/3"),
        ])
    }

    #[test]
    fn new_state_starts_at_zero() {
        let usage = UsageState::new(&catalog());
        assert_eq!(usage.times_used("Oxford Circus"), 0);
        assert_eq!(usage.times_used("Stratford"), 0);
        assert_eq!(usage.used_count(), 0);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut usage = UsageState::new(&catalog());
        usage.increment("oxford circus");
        usage.increment("OXFORD CIRCUS");
        assert_eq!(usage.times_used("Oxford Circus"), 2);
    }

    #[test]
    fn unknown_names_count_as_unused() {
        let usage = UsageState::new(&catalog());
        assert_eq!(usage.times_used("Nowhere"), 0);
    }

    #[test]
    fn totals_track_counts() {
        let mut usage = UsageState::new(&catalog());
        usage.set("Stratford", 3);
        usage.increment("Oxford Circus");
        assert_eq!(usage.used_count(), 2);
        assert_eq!(usage.total_uses(), 4);
    }
}
