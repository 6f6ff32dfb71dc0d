use tube_core::engine;
use tube_core::{board, BoardRow, Catalog, Colour, Outcome, Tier, Tracker, UsageState};

/// In-memory tracker backing the interactive station board.
///
/// Usage lives only as long as the session; nothing is written anywhere.
pub struct BoardTracker {
    catalog: Catalog,
    usage: UsageState,
    tier: Tier,
}

impl BoardTracker {
    pub fn new(catalog: Catalog, tier: Tier) -> Self {
        let usage = UsageState::new(&catalog);
        Self {
            catalog,
            usage,
            tier,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn usage(&self) -> &UsageState {
        &self.usage
    }
}

impl Tracker for BoardTracker {
    fn name(&self) -> &'static str {
        "board"
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn set_tier(&mut self, tier: Tier) {
        log::debug!("Tier changed from {} to {}", self.tier, tier);
        self.tier = tier;
    }

    fn guess(&mut self, station: &str, colour: Colour) -> Outcome {
        engine::evaluate_guess(station, colour, self.tier, &mut self.usage, &self.catalog)
    }

    fn wildcard(&mut self, station: &str) -> Outcome {
        engine::unlock(station, &mut self.usage, &self.catalog)
    }

    fn reset(&mut self) {
        self.usage = engine::reset_all(&self.catalog);
    }

    fn rows(&self, filter: &str) -> Vec<BoardRow> {
        board::render_rows(&self.catalog, &self.usage, self.tier, filter)
    }
}
