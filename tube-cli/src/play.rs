//! Interactive play loop.
//!
//! Reads one command per line, drives a [`Tracker`], and re-renders the
//! board after every change.

use crate::render::{write_outcome, write_table};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tube_core::{Colour, Outcome, Tier, Tracker};

pub const HELP: &str = "\
Commands:
  guess <colour> <station>   guess a station for a ball colour
  wildcard <station>         unlock one used station
  reset                      clear all station usage
  tier <tier>                switch tier (Casual, Intermediate, Advanced)
  search [text]              filter the board by station name
  board                      show the board
  help                       show this help
  quit                       leave the game";

const RESET_PROMPT: &str =
    "Are you sure you want to reset the game? This will clear all station usage. [y/N]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess { colour: Colour, station: String },
    Wildcard(String),
    Reset,
    Tier(Tier),
    Search(String),
    Board,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "guess" | "g" => {
            let (colour, station) = match rest.split_once(char::is_whitespace) {
                Some((colour, station)) => (colour, station.trim()),
                None => (rest, ""),
            };
            if colour.is_empty() {
                return Err("usage: guess <colour> <station>".to_string());
            }
            let colour = colour.parse::<Colour>().map_err(|err| err.to_string())?;
            Command::Guess {
                colour,
                station: station.to_string(),
            }
        }
        "wildcard" | "w" => Command::Wildcard(rest.to_string()),
        "reset" => Command::Reset,
        "tier" => Command::Tier(rest.parse::<Tier>().map_err(|err| err.to_string())?),
        "search" | "s" => Command::Search(rest.to_string()),
        "board" | "b" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

/// One player's session over a tracker.
pub struct Session {
    tracker: Box<dyn Tracker>,
    filter: String,
}

impl Session {
    pub fn new(tracker: Box<dyn Tracker>) -> Self {
        Self {
            tracker,
            filter: String::new(),
        }
    }

    pub fn tracker(&self) -> &dyn Tracker {
        self.tracker.as_ref()
    }

    fn show_board(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Tier: {}", self.tracker.tier())?;
        write_table(out, &self.tracker.rows(&self.filter))?;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.tracker
            .flush()
            .with_context(|| format!("failed to save {} tracker", self.tracker.name()))
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
        log::info!("Starting {} session at {} tier", self.tracker.name(), self.tracker.tier());
        self.show_board(out)?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command, input, out)?,
                Err(message) => writeln!(out, "❌ {}", message)?,
            }
        }
        Ok(())
    }

    /// Apply one command.
    pub fn execute(
        &mut self,
        command: Command,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<()> {
        match command {
            Command::Guess { colour, station } => {
                let outcome = self.tracker.guess(&station, colour);
                write_outcome(out, &outcome)?;
                if matches!(outcome, Outcome::Correct { .. }) {
                    self.persist()?;
                    self.show_board(out)?;
                }
            }
            Command::Wildcard(station) => {
                let outcome = self.tracker.wildcard(&station);
                write_outcome(out, &outcome)?;
                if matches!(outcome, Outcome::Unlocked(_)) {
                    self.persist()?;
                    self.show_board(out)?;
                }
            }
            Command::Reset => {
                if confirm(input, out, RESET_PROMPT)? {
                    self.tracker.reset();
                    self.persist()?;
                    self.filter.clear();
                    writeln!(out, "✅ Game has been reset.")?;
                    self.show_board(out)?;
                }
            }
            Command::Tier(tier) => {
                self.tracker.set_tier(tier);
                self.persist()?;
                self.show_board(out)?;
            }
            Command::Search(filter) => {
                self.filter = filter;
                self.show_board(out)?;
            }
            Command::Board => self.show_board(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }
}

/// Ask a yes/no question; anything but y/yes is a no.
pub fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> Result<bool> {
    write!(out, "{} ", question)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_shell::BoardTracker;
    use std::io::Cursor;
    use tube_core::{Catalog, LineInfo, Station};

    fn session(tier: Tier) -> Session {
        let catalog = Catalog::new(vec![
            Station::new(
                "Oxford Circus",
                vec![
                    LineInfo::with_colour("Central line", "Red"),
                    LineInfo::with_colour("Bakerloo line", "Brown"),
                ],
                "1",
            ),
            Station::new(
                "King's Cross St. Pancras",
                vec![
                    LineInfo::with_colour("Northern line", "Black"),
                    LineInfo::with_colour("Piccadilly line", "Blue"),
                ],
                "1",
            ),
        ]);
        Session::new(Box::new(BoardTracker::new(catalog, tier)))
    }

    fn play(session: &mut Session, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_guess_with_multi_word_station() {
        assert_eq!(
            parse_command("guess blue King's Cross St. Pancras"),
            Ok(Some(Command::Guess {
                colour: Colour::Blue,
                station: "King's Cross St. Pancras".to_string(),
            }))
        );
    }

    #[test]
    fn parses_other_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("TIER advanced"), Ok(Some(Command::Tier(Tier::Advanced))));
        assert_eq!(parse_command("search"), Ok(Some(Command::Search(String::new()))));
        assert_eq!(
            parse_command("w Oxford Circus"),
            Ok(Some(Command::Wildcard("Oxford Circus".to_string())))
        );
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("guess purple Bank").is_err());
        assert!(parse_command("guess").is_err());
        assert!(parse_command("tier expert").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn guess_without_station_is_empty_input() {
        let mut session = session(Tier::Casual);
        let text = play(&mut session, "guess red\n");
        assert!(text.contains("❌ Please enter a station name."));
    }

    #[test]
    fn advanced_game_flow() {
        let mut session = session(Tier::Advanced);
        let text = play(
            &mut session,
            "guess brown oxford circus\n\
             guess red Oxford Circus\n\
             wildcard oxford circus\n\
             wildcard oxford circus\n\
             quit\n",
        );

        assert!(text.contains("✅ Correct! \"Oxford Circus\" is a valid Brown station."));
        assert!(text.contains("❌ Station \"Oxford Circus\" is locked."));
        assert!(text.contains("✅ Wildcard used! \"Oxford Circus\" has been unlocked."));
        assert!(text.contains("❌ \"Oxford Circus\" is not currently used."));
        assert_eq!(session.tracker().rows("oxford")[0].times_used, 0);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut session = session(Tier::Casual);
        play(&mut session, "guess black King's Cross St. Pancras\nreset\nn\n");
        assert_eq!(session.tracker().rows("king")[0].times_used, 1);

        let text = play(&mut session, "reset\ny\n");
        assert!(text.contains("Game has been reset."));
        assert_eq!(session.tracker().rows("king")[0].times_used, 0);
    }

    #[test]
    fn search_filters_board() {
        let mut session = session(Tier::Casual);
        let text = play(&mut session, "search king\n");
        assert!(text.contains("1 stations shown"));
    }

    #[test]
    fn tier_change_relocks_board() {
        let mut session = session(Tier::Casual);
        play(&mut session, "guess red Oxford Circus\ntier advanced\n");
        assert_eq!(session.tracker().tier(), Tier::Advanced);
        assert_eq!(session.tracker().rows("oxford")[0].status, tube_core::Status::Locked);
    }
}
