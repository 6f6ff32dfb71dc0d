pub mod board;
pub mod colour;
pub mod engine;
pub mod error;
pub mod station;
pub mod tier;
pub mod usage;

pub use board::{BoardRow, BoardSummary, Status};
pub use colour::Colour;
pub use engine::Outcome;
pub use error::{CatalogError, TrackerError};
pub use station::{Catalog, LineInfo, Station};
pub use tier::Tier;
pub use usage::UsageState;

/// A game tracker that applies the eligibility rules to its own store.
///
/// Implemented by the in-memory board and the persisted grid so either can
/// sit behind the same front end.
pub trait Tracker {
    fn name(&self) -> &'static str;

    fn tier(&self) -> Tier;

    fn set_tier(&mut self, tier: Tier);

    /// Judge a guess and record it if correct.
    fn guess(&mut self, station: &str, colour: Colour) -> Outcome;

    /// Spend a wildcard on one station.
    fn wildcard(&mut self, station: &str) -> Outcome;

    /// Clear all usage.
    fn reset(&mut self);

    /// Visible table rows for a search filter.
    fn rows(&self, filter: &str) -> Vec<BoardRow>;

    /// Persist pending changes. Trackers without storage have nothing to do.
    fn flush(&mut self) -> Result<(), TrackerError> {
        Ok(())
    }
}
