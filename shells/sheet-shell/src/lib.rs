//! Station tracker sheet helper.
//!
//! Applies the shared eligibility rules to a persisted grid instead of an
//! in-memory map: usage comes from the "Times Used" column and every change
//! is written back to the grid cells before [`SheetTracker::save`].

pub mod error;
pub mod grid;

pub use error::SheetError;
pub use grid::{Grid, GridRow};

use chrono::{Local, NaiveDate};
use grid::{LOCKED_NO, LOCKED_YES};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tube_core::engine;
use tube_core::station::name_key;
use tube_core::{
    board, BoardRow, Catalog, Colour, Outcome, Status, Tier, Tracker, TrackerError, UsageState,
};

/// Result of rewriting the "Currently Locked?" column for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockUpdate {
    pub tier: Tier,
    pub changed: usize,
}

impl LockUpdate {
    pub fn describe(&self) -> String {
        match (self.tier, self.changed) {
            (Tier::Casual, _) => {
                "In Casual Tier, stations are always reusable. All stations marked unlocked."
                    .to_string()
            }
            (tier, 0) => format!("No station lock statuses needed an update for {} Tier.", tier),
            (tier, changed) => {
                format!("{} station lock statuses updated for {} Tier.", changed, tier)
            }
        }
    }
}

/// Note written next to a station freed by a wildcard.
pub fn unlock_note(date: NaiveDate) -> String {
    format!("Unlocked by Wildcard {}", date.format("%Y-%m-%d"))
}

fn lock_cell(locked: bool) -> &'static str {
    if locked {
        LOCKED_YES
    } else {
        LOCKED_NO
    }
}

/// Tracker backed by a CSV grid file.
pub struct SheetTracker {
    path: PathBuf,
    grid: Grid,
    catalog: Catalog,
    usage: UsageState,
    tier: Tier,
}

impl SheetTracker {
    /// Open an existing tracker sheet.
    pub fn open(path: &Path, tier: Tier) -> Result<Self, SheetError> {
        let grid = Grid::read(path)?;
        Ok(Self::from_grid(path, grid, tier))
    }

    /// Write a fresh sheet for a catalog and open it.
    pub fn create(path: &Path, catalog: &Catalog, tier: Tier) -> Result<Self, SheetError> {
        let grid = Grid::from_catalog(catalog);
        grid.write(path)?;
        Ok(Self::from_grid(path, grid, tier))
    }

    pub fn from_grid(path: &Path, grid: Grid, tier: Tier) -> Self {
        let catalog = grid.catalog();
        let mut usage = UsageState::new(&catalog);
        let mut seen = HashSet::new();
        for row in grid.named_rows() {
            // Duplicate names: the first row wins, as in catalog lookup.
            if seen.insert(name_key(row.station_name())) {
                usage.set(row.station_name(), row.times_used());
            }
        }
        Self {
            path: path.to_path_buf(),
            grid,
            catalog,
            usage,
            tier,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn usage(&self) -> &UsageState {
        &self.usage
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite "Currently Locked?" for every named row under `tier`.
    ///
    /// Blank-named rows are left as they are. Also makes `tier` the active
    /// tier for later guesses.
    pub fn update_locks(&mut self, tier: Tier) -> LockUpdate {
        self.tier = tier;
        let mut changed = 0;
        for row in self.grid.rows.iter_mut().filter(|row| row.is_named()) {
            let target = lock_cell(tier.locks_at(row.times_used()));
            if row.currently_locked != target {
                row.currently_locked = target.to_string();
                changed += 1;
            }
        }
        log::info!("{} lock statuses changed for {} tier", changed, tier);
        LockUpdate { tier, changed }
    }

    /// Wildcard unlock, noting the given date on the station's row.
    ///
    /// The sheet frees any listed station, used or not: the count goes to 0,
    /// the lock cell to "No" and the note is rewritten.
    pub fn unlock_on(&mut self, station: &str, date: NaiveDate) -> Outcome {
        let station = station.trim();
        if station.is_empty() {
            return Outcome::EmptyInput;
        }
        let Some(row) = self.grid.find_row_mut(station) else {
            return Outcome::StationNotFound(station.to_string());
        };
        row.times_used = "0".to_string();
        row.currently_locked = LOCKED_NO.to_string();
        row.notes = unlock_note(date);

        let name = row.station_name().to_string();
        self.usage.set(&name, 0);
        log::info!("Wildcard unlocked {} on the sheet", name);
        Outcome::Unlocked(name)
    }

    /// Persist the grid to its file.
    pub fn save(&self) -> Result<(), SheetError> {
        self.grid.write(&self.path)
    }
}

impl Tracker for SheetTracker {
    fn name(&self) -> &'static str {
        "sheet"
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn set_tier(&mut self, tier: Tier) {
        self.update_locks(tier);
    }

    fn guess(&mut self, station: &str, colour: Colour) -> Outcome {
        let outcome =
            engine::evaluate_guess(station, colour, self.tier, &mut self.usage, &self.catalog);
        if let Outcome::Correct { station, .. } = &outcome {
            let times_used = self.usage.times_used(station);
            let locked = self.tier.locks_at(times_used);
            if let Some(row) = self.grid.find_row_mut(station) {
                row.times_used = times_used.to_string();
                row.currently_locked = lock_cell(locked).to_string();
            }
        }
        outcome
    }

    fn wildcard(&mut self, station: &str) -> Outcome {
        self.unlock_on(station, Local::now().date_naive())
    }

    /// Every row, named or not, goes back to unused, unlocked and note-free.
    fn reset(&mut self) {
        for row in &mut self.grid.rows {
            row.times_used = "0".to_string();
            row.currently_locked = LOCKED_NO.to_string();
            row.notes.clear();
        }
        self.usage = engine::reset_all(&self.catalog);
    }

    fn rows(&self, filter: &str) -> Vec<BoardRow> {
        self.grid
            .named_rows()
            .filter(|row| board::matches_filter(row.station_name(), filter))
            .map(|row| {
                let times_used = row.times_used();
                BoardRow {
                    name: row.station_name().to_string(),
                    lines_served: row.lines_served.clone(),
                    valid_colours: row.valid_colours.clone(),
                    zone: row.zone.clone(),
                    times_used,
                    status: Status::from_locked(self.tier.locks_at(times_used)),
                }
            })
            .collect()
    }

    fn flush(&mut self) -> Result<(), TrackerError> {
        self.save()?;
        Ok(())
    }
}
