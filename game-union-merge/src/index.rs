//! Primary catalog index keyed by normalized title.
//!
//! Source A is materialized here in full before matching starts. Records are
//! stored in an arena so a record's identity is its slot number, which lets
//! the orchestrator track match state in a side table instead of tagging
//! records.

use std::collections::HashMap;

use game_union_core::GameRecord;

use crate::policy::DuplicatePolicy;

/// What happened to a record handed to [`PrimaryIndex::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Stored and reachable by its title key.
    Indexed { slot: usize },
    /// Stored for output only; its title normalizes to nothing.
    EmptyTitle { slot: usize },
    /// Another record already owns the key. `kept` is the slot the duplicate
    /// was stored in under [`DuplicatePolicy::Keep`], `None` if dropped.
    Duplicate { existing: usize, kept: Option<usize> },
}

/// Normalized title → first record with that title, plus every other
/// source-A record that must still reach the output.
#[derive(Debug, Default)]
pub struct PrimaryIndex {
    records: Vec<GameRecord>,
    indexed: Vec<bool>,
    by_key: HashMap<String, usize>,
    duplicates: DuplicatePolicy,
    duplicates_dropped: usize,
}

impl PrimaryIndex {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Build an index where the first record per key wins and later
    /// same-key records are dropped.
    pub fn build(records: impl IntoIterator<Item = GameRecord>) -> Self {
        let mut index = Self::new(DuplicatePolicy::Drop);
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Add one source-A record.
    pub fn insert(&mut self, record: GameRecord) -> Insertion {
        let key = record.title_key();

        if key.is_empty() {
            let slot = self.push(record, false);
            return Insertion::EmptyTitle { slot };
        }

        if let Some(&existing) = self.by_key.get(&key) {
            let kept = match self.duplicates {
                DuplicatePolicy::Drop => {
                    self.duplicates_dropped += 1;
                    None
                }
                DuplicatePolicy::Keep => Some(self.push(record, false)),
            };
            return Insertion::Duplicate { existing, kept };
        }

        let slot = self.push(record, true);
        self.by_key.insert(key, slot);
        Insertion::Indexed { slot }
    }

    fn push(&mut self, record: GameRecord, indexed: bool) -> usize {
        self.records.push(record);
        self.indexed.push(indexed);
        self.records.len() - 1
    }

    /// Slot of the record owning a normalized title key.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn record(&self, slot: usize) -> &GameRecord {
        &self.records[slot]
    }

    /// Swap in the merged version of a slot's record.
    pub fn replace(&mut self, slot: usize, record: GameRecord) {
        self.records[slot] = record;
    }

    pub fn is_indexed(&self, slot: usize) -> bool {
        self.indexed[slot]
    }

    /// Slots reachable by key, in insertion order.
    pub fn indexed_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexed
            .iter()
            .enumerate()
            .filter_map(|(slot, &indexed)| indexed.then_some(slot))
    }

    /// Number of stored records (indexed or not).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Consume the index, yielding every stored record in insertion order.
    pub fn into_records(self) -> Vec<GameRecord> {
        self.records
    }
}

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod tests;
