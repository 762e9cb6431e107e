//! Shared primitive IDs and unit/page enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// History entry identifier (RFC 3339 creation timestamp, possibly suffixed).
pub type HistoryId = String;

/// Source unit accepted by the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    /// 10 000 square meters.
    Hectare,
    /// 100 square meters.
    Are,
    /// Square meter.
    Sqm,
    /// Any unrecognized unit tag; converts to zero area.
    #[serde(other)]
    Other,
}

impl AreaUnit {
    /// Lowercase tag used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hectare => "hectare",
            Self::Are => "are",
            Self::Sqm => "sqm",
            Self::Other => "other",
        }
    }

    /// Parses a unit tag. Unknown tags map to [`AreaUnit::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hectare" | "ha" => Self::Hectare,
            "are" => Self::Are,
            "sqm" | "m2" => Self::Sqm,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePage {
    /// Single-value converter.
    Home,
    /// Composite hectare/are/sqm entry from a 7/12 extract.
    SevenTwelve,
}

impl SourcePage {
    /// Storage tag for the page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::SevenTwelve => "seven-twelve",
        }
    }
}

impl fmt::Display for SourcePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
