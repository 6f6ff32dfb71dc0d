//! Plain-text station table.

use std::io::{self, Write};
use tube_core::{BoardRow, BoardSummary, Outcome};

const HEADERS: [&str; 6] = [
    "Station",
    "Lines Served",
    "Valid Colours",
    "Zone",
    "Used",
    "Status",
];

fn cells(row: &BoardRow) -> [String; 6] {
    [
        row.name.clone(),
        row.lines_served.clone(),
        row.valid_colours.clone(),
        row.zone.clone(),
        row.times_used.to_string(),
        row.status.to_string(),
    ]
}

/// Write the rows as an aligned table followed by a summary line.
pub fn write_table(out: &mut dyn Write, rows: &[BoardRow]) -> io::Result<()> {
    let body: Vec<[String; 6]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS.map(str::to_string), &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &body {
        write_line(out, row, &widths)?;
    }

    writeln!(out, "{}", BoardSummary::from_rows(rows).describe())
}

fn write_line(out: &mut dyn Write, cells: &[String; 6], widths: &[usize; 6]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

/// Write an outcome message, marked as success or error.
pub fn write_outcome(out: &mut dyn Write, outcome: &Outcome) -> io::Result<()> {
    let mark = if outcome.is_error() { "❌" } else { "✅" };
    writeln!(out, "{} {}", mark, outcome)
}
