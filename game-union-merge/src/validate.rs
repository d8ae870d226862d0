//! Same-entity validation for records that share a title key.
//!
//! Two providers agreeing on a normalized title is strong evidence but not
//! proof: "Doom" (1993) and "DOOM" (2016) collide. The validator uses entity
//! kind and release year to split such pairs.

use std::fmt;

use game_union_core::GameRecord;

use crate::policy::MatchPolicy;

/// Why a title-matched pair was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameReason {
    /// At least one side has no usable year.
    UnknownYear,
    /// Years within the near-release window.
    NearRelease,
    /// Years apart, but not far enough to be a remake.
    Port,
}

/// Why a title-matched pair was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// One is a game, the other a DLC (or other kind).
    Kind,
    /// Releases this many years apart.
    YearGap(u32),
    /// A year is missing and the policy does not merge on missing years.
    UnknownYear,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind => f.write_str("kind mismatch"),
            Self::YearGap(d) => write!(f, "release years {} apart", d),
            Self::UnknownYear => f.write_str("release year unknown"),
        }
    }
}

/// Outcome of [`same_entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Same(SameReason),
    Different(Mismatch),
}

impl Verdict {
    pub fn is_same(&self) -> bool {
        matches!(self, Self::Same(_))
    }
}

/// Decide whether a source-A and a source-B record with the same title key
/// describe one game.
pub fn same_entity(policy: &MatchPolicy, a: &GameRecord, b: &GameRecord) -> Verdict {
    if a.kind != b.kind {
        return Verdict::Different(Mismatch::Kind);
    }

    let (year_a, year_b) = match (a.year(), b.year()) {
        (Some(ya), Some(yb)) => (ya, yb),
        _ if policy.unknown_year_is_same => return Verdict::Same(SameReason::UnknownYear),
        _ => return Verdict::Different(Mismatch::UnknownYear),
    };

    let gap = year_a.abs_diff(year_b);
    if gap <= policy.near_release_years {
        Verdict::Same(SameReason::NearRelease)
    } else if gap < policy.remake_gap_years {
        Verdict::Same(SameReason::Port)
    } else {
        Verdict::Different(Mismatch::YearGap(gap))
    }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
