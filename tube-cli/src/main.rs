//! Snooker Tube Game CLI
//!
//! Plays the station game against an in-memory board or a tracker sheet, and
//! exposes the sheet helper actions (lock update, wildcard unlock, reset).

mod play;
mod render;

use anyhow::{Context, Result};
use board_shell::BoardTracker;
use clap::{Parser, Subcommand};
use sheet_shell::SheetTracker;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tube_core::{BoardSummary, Catalog, Outcome, Tier, Tracker};

#[derive(Parser)]
#[command(name = "tube")]
#[command(about = "Snooker Tube Game: guess stations by ball colour", long_about = None)]
struct Cli {
    /// Station catalog JSON file
    #[arg(long, global = true, default_value = "data/stations.json")]
    catalog: PathBuf,

    /// Difficulty tier (Casual, Intermediate, Advanced)
    #[arg(long, global = true, default_value = "Casual")]
    tier: Tier,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        /// Track usage in a sheet file instead of in memory
        #[arg(long)]
        sheet: Option<PathBuf>,
    },

    /// Print the station board once
    Board {
        /// Only show stations whose name contains this text
        #[arg(long, default_value = "")]
        filter: String,

        /// Read usage from a sheet file
        #[arg(long)]
        sheet: Option<PathBuf>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tracker sheet helpers
    Sheet {
        #[command(subcommand)]
        action: SheetAction,
    },
}

#[derive(Subcommand)]
enum SheetAction {
    /// Create a fresh sheet from the catalog
    Init {
        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Rewrite "Currently Locked?" for a tier
    UpdateLocks {
        /// Sheet CSV file path
        sheet: PathBuf,

        /// Tier to apply (Casual, Intermediate, Advanced)
        #[arg(value_name = "TIER")]
        lock_tier: Tier,
    },

    /// Unlock one station with a wildcard
    Unlock {
        /// Sheet CSV file path
        sheet: PathBuf,

        /// Station name
        #[arg(num_args = 1.., required = true)]
        station: Vec<String>,
    },

    /// Reset every station for a new game
    Reset {
        /// Sheet CSV file path
        sheet: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { sheet } => {
            let tracker = open_tracker(&cli.catalog, sheet.as_deref(), cli.tier)?;
            let mut session = play::Session::new(tracker);
            println!("{}", play::HELP);

            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            session.run(&mut input, &mut out)?;

            let summary = BoardSummary::from_rows(&session.tracker().rows(""));
            log::info!("Session ended: {}", summary.describe());
        }

        Commands::Board {
            filter,
            sheet,
            json,
        } => {
            let tracker = open_tracker(&cli.catalog, sheet.as_deref(), cli.tier)?;
            let rows = tracker.rows(&filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                render::write_table(&mut io::stdout(), &rows)?;
            }
        }

        Commands::Sheet { action } => run_sheet_action(action, &cli.catalog, cli.tier)?,
    }

    Ok(())
}

fn open_tracker(catalog: &Path, sheet: Option<&Path>, tier: Tier) -> Result<Box<dyn Tracker>> {
    match sheet {
        Some(path) => {
            let mut tracker = open_sheet(path, tier)?;
            tracker.update_locks(tier);
            Ok(Box::new(tracker))
        }
        None => {
            let catalog = load_catalog(catalog)?;
            Ok(Box::new(BoardTracker::new(catalog, tier)))
        }
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog = Catalog::load(path)
        .with_context(|| format!("Failed to load station catalog: {}", path.display()))?;
    if catalog.is_empty() {
        anyhow::bail!("Station catalog {} has no stations", path.display());
    }
    Ok(catalog)
}

fn open_sheet(path: &Path, tier: Tier) -> Result<SheetTracker> {
    SheetTracker::open(path, tier)
        .with_context(|| format!("Failed to open tracker sheet: {}", path.display()))
}

/// Wildcard one station on a sheet. The file is only rewritten when the
/// station was actually unlocked.
fn unlock_station(sheet: &Path, station: &str, tier: Tier) -> Result<Outcome> {
    let mut tracker = open_sheet(sheet, tier)?;
    let outcome = tracker.wildcard(station);
    if matches!(outcome, Outcome::Unlocked(_)) {
        tracker
            .save()
            .with_context(|| format!("Failed to save tracker sheet: {}", sheet.display()))?;
    }
    Ok(outcome)
}

fn run_sheet_action(action: SheetAction, catalog: &Path, tier: Tier) -> Result<()> {
    match action {
        SheetAction::Init { out } => {
            let catalog = load_catalog(catalog)?;
            let tracker = SheetTracker::create(&out, &catalog, tier)
                .with_context(|| format!("Failed to write tracker sheet: {}", out.display()))?;
            println!(
                "✅ Created {} with {} stations",
                tracker.path().display(),
                tracker.grid().rows.len()
            );
        }

        SheetAction::UpdateLocks { sheet, lock_tier } => {
            let mut tracker = open_sheet(&sheet, lock_tier)?;
            let update = tracker.update_locks(lock_tier);
            tracker.save()?;
            println!("✅ {}", update.describe());
        }

        SheetAction::Unlock { sheet, station } => {
            let outcome = unlock_station(&sheet, &station.join(" "), tier)?;
            render::write_outcome(&mut io::stdout(), &outcome)?;
        }

        SheetAction::Reset { sheet, yes } => {
            let mut tracker = open_sheet(&sheet, tier)?;
            let question = "Reset all stations for a new game? This sets \"Times Used\" to 0, \
                \"Currently Locked?\" to \"No\" and clears \"Notes\" for every entry. [y/N]";
            let confirmed = yes || {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                play::confirm(&mut input, &mut io::stdout(), question)?
            };
            if confirmed {
                tracker.reset();
                tracker.save()?;
                println!("✅ All stations have been reset for a new game.");
            } else {
                println!("Reset cancelled.");
            }
        }
    }

    io::stdout().flush()?;
    Ok(())
}
