//! Station catalog: the immutable list of stations a game is played over.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// One line served by a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    /// Declared line name, e.g. "Central line".
    #[serde(rename = "line")]
    pub name: String,
    /// Display colour for the line, if the catalog gives one.
    #[serde(default)]
    pub colour: Option<String>,
}

impl LineInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            colour: None,
        }
    }

    pub fn with_colour(name: &str, colour: &str) -> Self {
        Self {
            name: name.to_string(),
            colour: Some(colour.to_string()),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<LineInfo>,
    /// Display only. The source data mixes strings ("2/3"), numbers (1) and
    /// the occasional null, which reads as blank.
    #[serde(default, deserialize_with = "zone_from_text_or_number")]
    pub zone: String,
}

impl Station {
    pub fn new(name: &str, lines: Vec<LineInfo>, zone: &str) -> Self {
        Self {
            name: name.to_string(),
            lines,
            zone: zone.to_string(),
        }
    }

    /// Comma-joined line names, in catalog order.
    pub fn lines_served(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Comma-joined colours of the lines that declare one.
    pub fn valid_colours(&self) -> String {
        self.lines
            .iter()
            .filter_map(|line| line.colour.as_deref())
            .filter(|colour| !colour.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn zone_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Zone {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Zone>::deserialize(deserializer)? {
        Some(Zone::Text(text)) => text,
        Some(Zone::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Key used for every case-insensitive station lookup.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Ordered, read-only list of stations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    stations: Vec<Station>,
}

impl Catalog {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Parse a catalog from its JSON array form.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let stations: Vec<Station> = serde_json::from_str(json)?;
        Ok(Self::new(stations))
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} stations from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Case-insensitive exact lookup. The first matching entry wins.
    pub fn find(&self, name: &str) -> Option<&Station> {
        let key = name_key(name);
        self.stations
            .iter()
            .find(|station| name_key(&station.name) == key)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<Station> for Catalog {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
