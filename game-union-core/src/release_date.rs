use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::lenient::LenientString;

/// Placeholder providers write for announced-but-undated releases.
pub const TBA: &str = "TBA";

/// A release date as reported by a provider.
///
/// Providers emit ISO `YYYY-MM-DD` dates, the `"TBA"` placeholder, or
/// nothing. Anything else is kept verbatim as [`ReleaseDate::Raw`] so it
/// survives a round trip, and still yields a year when it starts with one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "LenientString", into = "String")]
pub enum ReleaseDate {
    #[default]
    Unknown,
    Tba,
    Known(NaiveDate),
    Raw(String),
}

impl ReleaseDate {
    /// Parse a provider date string. Never fails.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::Unknown;
        }
        if s.eq_ignore_ascii_case(TBA) {
            return Self::Tba;
        }
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Self::Known(date),
            Err(_) => Self::Raw(s.to_string()),
        }
    }

    /// Release year, if one can be read from the date.
    ///
    /// Unparseable dates still yield a year when their first four characters
    /// are digits (`"2019-13-45"`, `"2019"`).
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Known(date) => Some(date.year()),
            Self::Raw(s) => {
                let prefix = s.get(..4)?;
                if !prefix.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                prefix.parse().ok().filter(|&y| y > 0)
            }
            Self::Unknown | Self::Tba => None,
        }
    }

    /// Whether the date carries real information (not empty, not TBA).
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Known(_) | Self::Raw(_))
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => Ok(()),
            Self::Tba => f.write_str(TBA),
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

impl From<LenientString> for ReleaseDate {
    fn from(s: LenientString) -> Self {
        s.0.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<ReleaseDate> for String {
    fn from(date: ReleaseDate) -> Self {
        date.to_string()
    }
}

#[cfg(test)]
#[path = "tests/release_date_tests.rs"]
mod tests;
