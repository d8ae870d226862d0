//! Tunable matching policy.
//!
//! The year thresholds are judgment calls, not facts about games, so they
//! live here as named fields instead of being scattered through the matchers.

/// Thresholds and switches that control when two records are the same game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPolicy {
    /// Exact pass: year gaps up to this many years are a simultaneous or
    /// staggered release of one game.
    pub near_release_years: u32,
    /// Exact pass: year gaps of at least this many years mean a remake,
    /// reboot, or unrelated game sharing the title. Gaps between
    /// `near_release_years` and this value are treated as ports.
    pub remake_gap_years: u32,
    /// Fuzzy pass: maximum year gap when both years are known.
    pub fuzzy_year_window: u32,
    /// Whether a missing year on either side lets an exact-title pair merge.
    pub unknown_year_is_same: bool,
    /// Store that source A itself represents. Listings for it coming from
    /// source B are never appended to a merged record.
    pub canonical_store: String,
    /// Run the fuzzy second pass at all.
    pub fuzzy_pass: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            near_release_years: 1,
            remake_gap_years: 10,
            fuzzy_year_window: 1,
            unknown_year_is_same: true,
            canonical_store: "steam".to_string(),
            fuzzy_pass: true,
        }
    }
}

/// What happens to a source-A record whose title key is already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Only the first record per key reaches the output.
    #[default]
    Drop,
    /// Later records are emitted unchanged but never matched.
    Keep,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Keep => "keep",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Some(Self::Drop),
            "keep" => Some(Self::Keep),
            _ => None,
        }
    }
}
