//! Station eligibility and locking rules.
//!
//! Every function here is a pure decision over the catalog, the active tier
//! and the session's [`UsageState`]. The only mutations are the `+1` on a
//! correct guess and the reset to zero on a successful unlock.

use crate::colour::Colour;
use crate::station::{Catalog, Station};
use crate::tier::Tier;
use crate::usage::UsageState;
use std::fmt;

/// Result of a guess or wildcard attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No station name was given.
    EmptyInput,
    /// No catalog entry matches the name as typed.
    StationNotFound(String),
    /// The station has reached the tier's reuse threshold.
    StationLocked(String),
    /// None of the station's lines qualify for the colour.
    InvalidColourMatch { station: String, colour: Colour },
    /// Guess accepted; the station's usage was incremented.
    Correct { station: String, colour: Colour },
    /// Wildcard target has not been used yet.
    NotCurrentlyUsed(String),
    /// Wildcard reset the station's usage to zero.
    Unlocked(String),
}

impl Outcome {
    /// Whether this outcome should be shown as an error message.
    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Correct { .. } | Outcome::Unlocked(_))
    }

    /// Canonical station name the outcome refers to, when one was resolved.
    pub fn station(&self) -> Option<&str> {
        match self {
            Outcome::EmptyInput | Outcome::StationNotFound(_) => None,
            Outcome::StationLocked(name)
            | Outcome::NotCurrentlyUsed(name)
            | Outcome::Unlocked(name) => Some(name.as_str()),
            Outcome::InvalidColourMatch { station, .. } | Outcome::Correct { station, .. } => {
                Some(station.as_str())
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::EmptyInput => write!(f, "Please enter a station name."),
            Outcome::StationNotFound(name) => write!(f, "Station \"{}\" not found.", name),
            Outcome::StationLocked(name) => write!(f, "Station \"{}\" is locked.", name),
            Outcome::InvalidColourMatch { station, colour } => write!(
                f,
                "\"{}\" is not a valid station for the {} ball.",
                station, colour
            ),
            Outcome::Correct { station, colour } => write!(
                f,
                "Correct! \"{}\" is a valid {} station.",
                station, colour
            ),
            Outcome::NotCurrentlyUsed(name) => write!(f, "\"{}\" is not currently used.", name),
            Outcome::Unlocked(name) => {
                write!(f, "Wildcard used! \"{}\" has been unlocked.", name)
            }
        }
    }
}

/// Whether a station is locked under `tier` given its current usage.
pub fn is_locked(station: &Station, tier: Tier, usage: &UsageState) -> bool {
    tier.locks_at(usage.times_used(&station.name))
}

/// Whether any of the station's lines qualifies for `colour`.
pub fn serves_colour(station: &Station, colour: Colour) -> bool {
    station
        .lines
        .iter()
        .any(|line| colour.matches_line(&line.name))
}

/// Judge a guess and record it when correct.
///
/// Checks run in a fixed order and the first failure wins: empty input,
/// unknown station, locked station, colour mismatch.
pub fn evaluate_guess(
    station_name: &str,
    colour: Colour,
    tier: Tier,
    usage: &mut UsageState,
    catalog: &Catalog,
) -> Outcome {
    let station_name = station_name.trim();
    if station_name.is_empty() {
        return Outcome::EmptyInput;
    }

    let Some(station) = catalog.find(station_name) else {
        return Outcome::StationNotFound(station_name.to_string());
    };

    if is_locked(station, tier, usage) {
        return Outcome::StationLocked(station.name.clone());
    }

    if !serves_colour(station, colour) {
        return Outcome::InvalidColourMatch {
            station: station.name.clone(),
            colour,
        };
    }

    let times_used = usage.increment(&station.name);
    log::debug!(
        "{} accepted for {} (used {} times, tier {})",
        station.name,
        colour,
        times_used,
        tier
    );
    Outcome::Correct {
        station: station.name.clone(),
        colour,
    }
}

/// Wildcard: clear one station's usage.
///
/// Only the usage count is consulted, never the tier.
pub fn unlock(station_name: &str, usage: &mut UsageState, catalog: &Catalog) -> Outcome {
    let station_name = station_name.trim();
    if station_name.is_empty() {
        return Outcome::EmptyInput;
    }

    let Some(station) = catalog.find(station_name) else {
        return Outcome::StationNotFound(station_name.to_string());
    };

    if usage.times_used(&station.name) == 0 {
        return Outcome::NotCurrentlyUsed(station.name.clone());
    }

    usage.set(&station.name, 0);
    log::debug!("{} unlocked by wildcard", station.name);
    Outcome::Unlocked(station.name.clone())
}

/// Fresh usage state with every catalog station at zero.
pub fn reset_all(catalog: &Catalog) -> UsageState {
    log::info!("Resetting usage for {} stations", catalog.len());
    UsageState::new(catalog)
}
