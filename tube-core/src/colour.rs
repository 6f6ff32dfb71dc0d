//! Ball colours and the line-name fragments that qualify a station for each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical line-name fragments per colour.
mod fragments {
    pub const RED: &[&str] = &["Central", "Metropolitan", "Weaver"];
    pub const YELLOW: &[&str] = &["Circle", "Lioness"];
    pub const GREEN: &[&str] = &["District", "Suffragette"];
    pub const BROWN: &[&str] = &["Bakerloo", "Windrush"];
    pub const BLUE: &[&str] = &["Piccadilly", "Victoria"];
    pub const PINK: &[&str] = &["Hammersmith & City", "Elizabeth"];
    pub const BLACK: &[&str] = &["Northern", "Jubilee"];
}

/// A snooker ball colour used as a guess category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Yellow,
    Green,
    Brown,
    Blue,
    Pink,
    Black,
}

impl Colour {
    pub const ALL: [Colour; 7] = [
        Colour::Red,
        Colour::Yellow,
        Colour::Green,
        Colour::Brown,
        Colour::Blue,
        Colour::Pink,
        Colour::Black,
    ];

    /// Line-name fragments registered for this colour.
    pub fn fragments(self) -> &'static [&'static str] {
        match self {
            Colour::Red => fragments::RED,
            Colour::Yellow => fragments::YELLOW,
            Colour::Green => fragments::GREEN,
            Colour::Brown => fragments::BROWN,
            Colour::Blue => fragments::BLUE,
            Colour::Pink => fragments::PINK,
            Colour::Black => fragments::BLACK,
        }
    }

    /// Whether a declared line name qualifies for this colour.
    ///
    /// Matching is case-sensitive substring containment, so "Elizabeth line"
    /// matches the "Elizabeth" fragment.
    pub fn matches_line(self, line_name: &str) -> bool {
        self.fragments()
            .iter()
            .any(|fragment| line_name.contains(fragment))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Colour::Red => "Red",
            Colour::Yellow => "Yellow",
            Colour::Green => "Green",
            Colour::Brown => "Brown",
            Colour::Blue => "Blue",
            Colour::Pink => "Pink",
            Colour::Black => "Black",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ball colour '{0}'")]
pub struct ParseColourError(pub String);

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Colour::ALL
            .into_iter()
            .find(|colour| colour.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseColourError(wanted.to_string()))
    }
}
