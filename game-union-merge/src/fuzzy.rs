//! Second-pass matching for records that found no exact title partner.
//!
//! Without a shared title key the evidence has to come from elsewhere, so a
//! candidate must agree on kind, be released within a tight year window,
//! share a developer, and have a title that contains (or is contained by)
//! the orphan's. The first candidate that passes wins; candidates are
//! scanned in primary-index order, which makes the result reproducible.

use std::collections::HashMap;

use game_union_core::{EntityKind, GameRecord, keys_similar, normalize_title};

use crate::index::PrimaryIndex;
use crate::policy::MatchPolicy;

/// Pre-normalized view of an unconsumed primary record.
#[derive(Debug)]
struct Candidate {
    slot: usize,
    year: Option<i32>,
    title_key: String,
    developer_keys: Vec<String>,
    consumed: bool,
}

/// Scans unconsumed primary records for fuzzy partners.
///
/// Candidates are bucketed by kind up front; kind equality is required, and
/// each bucket keeps index order, so the first hit is the same one a full
/// linear scan would find.
#[derive(Debug)]
pub struct FuzzyMatcher {
    year_window: u32,
    by_kind: HashMap<EntityKind, Vec<Candidate>>,
    remaining: usize,
}

impl FuzzyMatcher {
    /// Collect the candidates among `slots` (typically the indexed slots not
    /// merged during the exact pass).
    pub fn new(
        policy: &MatchPolicy,
        index: &PrimaryIndex,
        slots: impl IntoIterator<Item = usize>,
    ) -> Self {
        let mut by_kind: HashMap<EntityKind, Vec<Candidate>> = HashMap::new();
        let mut remaining = 0;

        for slot in slots {
            let record = index.record(slot);
            let title_key = record.title_key();
            if title_key.is_empty() {
                continue;
            }
            by_kind
                .entry(record.kind.clone())
                .or_default()
                .push(Candidate {
                    slot,
                    year: record.year(),
                    title_key,
                    developer_keys: developer_keys(record),
                    consumed: false,
                });
            remaining += 1;
        }

        Self {
            year_window: policy.fuzzy_year_window,
            by_kind,
            remaining,
        }
    }

    /// Number of candidates not yet matched.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Find the first candidate matching `orphan` and mark it consumed.
    pub fn find(&mut self, orphan: &GameRecord) -> Option<usize> {
        let title_key = orphan.title_key();
        if title_key.is_empty() {
            return None;
        }
        let developer_keys = developer_keys(orphan);
        if developer_keys.is_empty() {
            return None;
        }
        let year = orphan.year();
        let window = self.year_window;

        let bucket = self.by_kind.get_mut(&orphan.kind)?;
        let hit = bucket.iter_mut().find(|c| {
            !c.consumed
                && years_compatible(c.year, year, window)
                && developers_overlap(&c.developer_keys, &developer_keys)
                && titles_contain(&c.title_key, &title_key)
        })?;

        hit.consumed = true;
        let slot = hit.slot;
        self.remaining -= 1;
        Some(slot)
    }
}

/// Decide whether two records pass every fuzzy-match test.
pub fn is_fuzzy_match(policy: &MatchPolicy, a: &GameRecord, b: &GameRecord) -> bool {
    a.kind == b.kind
        && years_compatible(a.year(), b.year(), policy.fuzzy_year_window)
        && developers_overlap(&developer_keys(a), &developer_keys(b))
        && titles_contain(&a.title_key(), &b.title_key())
}

fn developer_keys(record: &GameRecord) -> Vec<String> {
    record
        .developers
        .iter()
        .map(|d| normalize_title(d))
        .filter(|d| !d.is_empty())
        .collect()
}

fn years_compatible(a: Option<i32>, b: Option<i32>, window: u32) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.abs_diff(b) <= window,
        _ => true,
    }
}

fn developers_overlap(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.iter().any(|y| keys_similar(x, y)))
}

fn titles_contain(a: &str, b: &str) -> bool {
    keys_similar(a, b)
}

#[cfg(test)]
#[path = "tests/fuzzy_tests.rs"]
mod tests;
