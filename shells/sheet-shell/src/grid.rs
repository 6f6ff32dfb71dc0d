//! The station tracker grid, stored as CSV.
//!
//! Layout (one header row, then one row per station):
//!
//! | col | header                  |
//! |-----|-------------------------|
//! | A   | Station Name            |
//! | B   | Lines Served            |
//! | C   | Valid for Colours       |
//! | D   | Zone(s)                 |
//! | E   | Times Used (This Game)  |
//! | F   | Currently Locked?       |
//! | G   | Notes                   |
//!
//! Cells are kept as text, and the header row and any columns past G are
//! carried along, so rows the helper does not touch are written back
//! exactly as they were read.

use crate::error::SheetError;
use std::path::Path;
use tube_core::station::name_key;
use tube_core::{Catalog, LineInfo, Station};

pub const HEADERS: [&str; 7] = [
    "Station Name",
    "Lines Served",
    "Valid for Colours",
    "Zone(s)",
    "Times Used (This Game)",
    "Currently Locked?",
    "Notes",
];

pub const LOCKED_YES: &str = "Yes";
pub const LOCKED_NO: &str = "No";

/// One data row of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridRow {
    pub name: String,
    pub lines_served: String,
    pub valid_colours: String,
    pub zone: String,
    pub times_used: String,
    pub currently_locked: String,
    pub notes: String,
    /// Cells past the Notes column.
    pub rest: Vec<String>,
}

impl GridRow {
    /// A fresh row for a catalog station: unused, unlocked, no notes.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            lines_served: station.lines_served(),
            valid_colours: station.valid_colours(),
            zone: station.zone.clone(),
            times_used: "0".to_string(),
            currently_locked: LOCKED_NO.to_string(),
            notes: String::new(),
            rest: Vec::new(),
        }
    }

    fn from_record(record: &csv::StringRecord) -> Self {
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        Self {
            name: cell(0),
            lines_served: cell(1),
            valid_colours: cell(2),
            zone: cell(3),
            times_used: cell(4),
            currently_locked: cell(5),
            notes: cell(6),
            rest: record.iter().skip(HEADERS.len()).map(String::from).collect(),
        }
    }

    fn cells(&self) -> impl Iterator<Item = &str> {
        [
            &self.name,
            &self.lines_served,
            &self.valid_colours,
            &self.zone,
            &self.times_used,
            &self.currently_locked,
            &self.notes,
        ]
        .into_iter()
        .map(String::as_str)
        .chain(self.rest.iter().map(String::as_str))
    }

    /// Rows with a blank name are ignored by every helper operation.
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn station_name(&self) -> &str {
        self.name.trim()
    }

    pub fn times_used(&self) -> u32 {
        parse_times_used(&self.times_used)
    }

    /// Station view of this row. Lines come from the comma-separated
    /// "Lines Served" cell; colours are not tied to individual lines here.
    pub fn to_station(&self) -> Station {
        let lines = self
            .lines_served
            .split(',')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(LineInfo::new)
            .collect();
        Station::new(self.station_name(), lines, self.zone.trim())
    }
}

/// Lenient count parsing: blank or non-numeric cells count as zero, and a
/// leading integer is accepted ("2 (approx)" reads as 2). Counts too large
/// for a `u32` saturate.
pub fn parse_times_used(raw: &str) -> u32 {
    let raw = raw.trim();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let digits = &raw[..digits_end];
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail on a non-empty run of ASCII digits.
    digits.parse().unwrap_or(u32::MAX)
}

/// All data rows of a tracker sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Header row as read. Empty means the standard [`HEADERS`].
    pub header: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// A fresh grid with one row per catalog station.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            header: Vec::new(),
            rows: catalog.iter().map(GridRow::from_station).collect(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, SheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| SheetError::open(path, source))?;

        let header = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(GridRow::from_record(&record));
        }

        log::info!("Read {} grid rows from {}", rows.len(), path.display());
        Ok(Self { header, rows })
    }

    pub fn write(&self, path: &Path) -> Result<(), SheetError> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|source| SheetError::open(path, source))?;
        if self.header.is_empty() {
            writer.write_record(HEADERS)?;
        } else {
            writer.write_record(&self.header)?;
        }
        for row in &self.rows {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;

        log::info!("Wrote {} grid rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    /// Catalog of the named rows, in sheet order.
    pub fn catalog(&self) -> Catalog {
        self.named_rows().map(GridRow::to_station).collect()
    }

    pub fn named_rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter().filter(|row| row.is_named())
    }

    /// First named row whose trimmed name matches, ignoring case.
    pub fn find_row_mut(&mut self, name: &str) -> Option<&mut GridRow> {
        let key = name_key(name.trim());
        self.rows
            .iter_mut()
            .find(|row| row.is_named() && name_key(row.station_name()) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SHEET: &str = "\
Station Name,Lines Served,Valid for Colours,Zone(s),Times Used (This Game),Currently Locked?,Notes
Oxford Circus,\"Central line, Bakerloo line, Victoria line\",\"Red, Brown, Blue\",1,2,Yes,
,,,,,,
Stratford,\"Elizabeth line, Jubilee line\",\"Pink, Black\",2/3,,No,keep me
";

    fn sheet_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SHEET.as_bytes()).unwrap();
        file
    }

    #[test]
    fn lenient_count_parsing() {
        assert_eq!(parse_times_used("3"), 3);
        assert_eq!(parse_times_used(" 2 "), 2);
        assert_eq!(parse_times_used(""), 0);
        assert_eq!(parse_times_used("n/a"), 0);
        assert_eq!(parse_times_used("4.0"), 4);
        assert_eq!(parse_times_used("-1"), 0);
    }

    #[test]
    fn oversized_counts_saturate() {
        assert_eq!(parse_times_used("5000000000"), u32::MAX);
        assert_eq!(parse_times_used("123456789012345678901234567890"), u32::MAX);
        assert!(tube_core::Tier::Advanced.locks_at(parse_times_used("5000000000")));
    }

    #[test]
    fn reads_rows_after_header() {
        let file = sheet_file();
        let grid = Grid::read(file.path()).unwrap();

        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.named_rows().count(), 2);
        assert_eq!(grid.rows[0].times_used(), 2);
        assert_eq!(grid.rows[2].times_used(), 0);
        assert_eq!(grid.rows[2].notes, "keep me");
    }

    #[test]
    fn builds_catalog_from_lines_served() {
        let file = sheet_file();
        let catalog = Grid::read(file.path()).unwrap().catalog();

        assert_eq!(catalog.len(), 2);
        let oxford = catalog.find("oxford circus").unwrap();
        let lines: Vec<_> = oxford.lines.iter().map(|line| line.name.as_str()).collect();
        assert_eq!(lines, vec!["Central line", "Bakerloo line", "Victoria line"]);
    }

    #[test]
    fn write_then_read_preserves_cells() {
        let file = sheet_file();
        let grid = Grid::read(file.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        grid.write(out.path()).unwrap();

        assert_eq!(Grid::read(out.path()).unwrap(), grid);
    }

    #[test]
    fn from_catalog_starts_unused() {
        let catalog = Catalog::new(vec![Station::new(
            "Bank",
            vec![
                LineInfo::with_colour("Central line", "Red"),
                LineInfo::with_colour("Northern line", "Black"),
            ],
            "1",
        )]);
        let grid = Grid::from_catalog(&catalog);

        assert_eq!(
            grid.rows[0],
            GridRow {
                name: "Bank".to_string(),
                lines_served: "Central line, Northern line".to_string(),
                valid_colours: "Red, Black".to_string(),
                zone: "1".to_string(),
                times_used: "0".to_string(),
                currently_locked: "No".to_string(),
                notes: String::new(),
                rest: Vec::new(),
            }
        );
    }

    #[test]
    fn extra_columns_and_header_survive_a_save() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            "Station,Lines,Colours,Zone,Used,Locked?,Notes,Guessed By\n\
             Bank,Central line,Red,1,0,No,,alice\n"
                .as_bytes(),
        )
        .unwrap();

        let grid = Grid::read(file.path()).unwrap();
        assert_eq!(grid.rows[0].rest, vec!["alice".to_string()]);
        grid.write(file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            written,
            "Station,Lines,Colours,Zone,Used,Locked?,Notes,Guessed By\n\
             Bank,Central line,Red,1,0,No,,alice\n"
        );
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = Grid::read(Path::new("/nonexistent/tracker.csv")).unwrap_err();
        assert!(matches!(err, SheetError::Open { .. }));
    }
}
