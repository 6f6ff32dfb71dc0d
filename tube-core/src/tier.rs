//! Difficulty tiers and their reuse thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty setting controlling how often a station may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    /// Stations are always reusable.
    #[default]
    Casual,
    /// Stations lock after their second correct guess.
    Intermediate,
    /// Stations lock after their first correct guess.
    Advanced,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Casual, Tier::Intermediate, Tier::Advanced];

    /// Number of uses at which a station locks, or `None` if it never does.
    pub fn lock_threshold(self) -> Option<u32> {
        match self {
            Tier::Casual => None,
            Tier::Intermediate => Some(2),
            Tier::Advanced => Some(1),
        }
    }

    /// Whether a station used `times_used` times is locked under this tier.
    pub fn locks_at(self, times_used: u32) -> bool {
        self.lock_threshold()
            .is_some_and(|threshold| times_used >= threshold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Casual => "Casual",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tier name is not one of the known tiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier '{0}' (expected Casual, Intermediate or Advanced)")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseTierError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_locks_from_first_use() {
        assert!(!Tier::Advanced.locks_at(0));
        assert!(Tier::Advanced.locks_at(1));
        assert!(Tier::Advanced.locks_at(5));
    }

    #[test]
    fn intermediate_locks_from_second_use() {
        assert!(!Tier::Intermediate.locks_at(0));
        assert!(!Tier::Intermediate.locks_at(1));
        assert!(Tier::Intermediate.locks_at(2));
    }

    #[test]
    fn casual_never_locks() {
        assert_eq!(Tier::Casual.lock_threshold(), None);
        assert!((0..100).all(|used| !Tier::Casual.locks_at(used)));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("advanced".parse::<Tier>(), Ok(Tier::Advanced));
        assert_eq!(" INTERMEDIATE ".parse::<Tier>(), Ok(Tier::Intermediate));
        assert_eq!("Casual".parse::<Tier>(), Ok(Tier::Casual));
        assert!("expert".parse::<Tier>().is_err());
    }

    #[test]
    fn displays_canonical_name() {
        assert_eq!(Tier::Intermediate.to_string(), "Intermediate");
    }
}
