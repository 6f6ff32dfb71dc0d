//! Rows for the station table, as shown to the player.

use crate::engine::is_locked;
use crate::station::{name_key, Catalog};
use crate::tier::Tier;
use crate::usage::UsageState;
use serde::Serialize;
use std::fmt;

/// Whether a station can currently be guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Available,
    Locked,
}

impl Status {
    pub fn from_locked(locked: bool) -> Self {
        if locked {
            Status::Locked
        } else {
            Status::Available
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Available => write!(f, "Available"),
            Status::Locked => write!(f, "Locked"),
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub name: String,
    pub lines_served: String,
    pub valid_colours: String,
    pub zone: String,
    pub times_used: u32,
    pub status: Status,
}

/// Whether `name` passes the search box filter.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    name_key(name).contains(&name_key(filter))
}

/// Build the visible rows, in catalog order, with lock status computed fresh.
pub fn render_rows(
    catalog: &Catalog,
    usage: &UsageState,
    tier: Tier,
    filter: &str,
) -> Vec<BoardRow> {
    catalog
        .iter()
        .filter(|station| matches_filter(&station.name, filter))
        .map(|station| BoardRow {
            name: station.name.clone(),
            lines_served: station.lines_served(),
            valid_colours: station.valid_colours(),
            zone: station.zone.clone(),
            times_used: usage.times_used(&station.name),
            status: Status::from_locked(is_locked(station, tier, usage)),
        })
        .collect()
}

/// Counts over a set of rows.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub visible: usize,
    pub locked: usize,
    pub used: usize,
}

impl BoardSummary {
    pub fn from_rows(rows: &[BoardRow]) -> Self {
        Self {
            visible: rows.len(),
            locked: rows.iter().filter(|row| row.status == Status::Locked).count(),
            used: rows.iter().filter(|row| row.times_used > 0).count(),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} stations shown, {} used, {} locked",
            self.visible, self.used, self.locked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{LineInfo, Station};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Station::new(
                "Oxford Circus",
                vec![
                    LineInfo::with_colour("Central line", "Red"),
                    LineInfo::with_colour("Bakerloo line", "Brown"),
                ],
                "1",
            ),
            Station::new("Stratford", vec![LineInfo::new("Jubilee line")], "2/3"),
            Station::new("Oxford Street", vec![], "1"),
        ])
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let catalog = catalog();
        let usage = UsageState::new(&catalog);
        let rows = render_rows(&catalog, &usage, Tier::Casual, "OXFORD");
        let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Oxford Circus", "Oxford Street"]);
    }

    #[test]
    fn empty_filter_shows_everything() {
        let catalog = catalog();
        let usage = UsageState::new(&catalog);
        assert_eq!(render_rows(&catalog, &usage, Tier::Casual, "").len(), 3);
    }

    #[test]
    fn rows_carry_joined_columns_and_status() {
        let catalog = catalog();
        let mut usage = UsageState::new(&catalog);
        usage.set("Oxford Circus", 1);

        let rows = render_rows(&catalog, &usage, Tier::Advanced, "circus");

        assert_eq!(
            rows,
            vec![BoardRow {
                name: "Oxford Circus".to_string(),
                lines_served: "Central line, Bakerloo line".to_string(),
                valid_colours: "Red, Brown".to_string(),
                zone: "1".to_string(),
                times_used: 1,
                status: Status::Locked,
            }]
        );
    }

    #[test]
    fn status_follows_tier_changes() {
        let catalog = catalog();
        let mut usage = UsageState::new(&catalog);
        usage.set("Stratford", 1);

        let advanced = render_rows(&catalog, &usage, Tier::Advanced, "strat");
        let intermediate = render_rows(&catalog, &usage, Tier::Intermediate, "strat");

        assert_eq!(advanced[0].status, Status::Locked);
        assert_eq!(intermediate[0].status, Status::Available);
    }

    #[test]
    fn summary_counts_rows() {
        let catalog = catalog();
        let mut usage = UsageState::new(&catalog);
        usage.set("Stratford", 2);
        usage.set("Oxford Circus", 1);

        let rows = render_rows(&catalog, &usage, Tier::Intermediate, "");
        let summary = BoardSummary::from_rows(&rows);

        assert_eq!(
            summary,
            BoardSummary {
                visible: 3,
                locked: 1,
                used: 2,
            }
        );
        assert!(summary.describe().contains("1 locked"));
    }
}
