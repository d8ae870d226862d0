//! Two-pass catalog reconciliation.
//!
//! Source A (the primary catalog) is indexed by normalized title. Source B is
//! streamed against that index: a title hit that passes same-entity
//! validation merges into the A slot, everything else becomes an orphan.
//! Orphans then get a fuzzy second chance against the A records nobody
//! claimed. The output is every A record (merged or not) in input order,
//! followed by the B records that never matched.
//!
//! The run moves strictly forward through [`RunState`]; if either input
//! stream yields an error the run aborts and no output is produced.

use std::fmt;

use game_union_core::GameRecord;
use thiserror::Error;

use crate::audit::{AuditEntry, AuditLog, RecordSummary};
use crate::fuzzy::FuzzyMatcher;
use crate::gallery::clean_gallery;
use crate::index::{Insertion, PrimaryIndex};
use crate::policy::{DuplicatePolicy, MatchPolicy};
use crate::progress::{ReconcileProgress, SilentProgress};
use crate::resolve::merge_records;
use crate::validate::{Verdict, same_entity};

/// Which input a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Primary,
    Secondary,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Neither the primary nor the secondary catalog is available")]
    NoSources,
    #[error("Failed reading {side} record #{position}: {message}")]
    Source {
        side: Side,
        position: usize,
        message: String,
    },
    #[error("Emitted {emitted} records, expected {expected}")]
    CountMismatch { emitted: usize, expected: usize },
}

/// Phases of a reconciliation run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Indexing,
    ExactPass,
    FuzzyPass,
    Emit,
    Done,
    Aborted,
}

/// Per-slot match state, kept beside the index rather than on the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    Unmatched,
    MergedExact,
    MergedFuzzy,
}

/// Options controlling a reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub policy: MatchPolicy,
    pub duplicates: DuplicatePolicy,
    /// Heading for the audit report (usually the output file name).
    pub report_title: String,
}

/// Counters for a reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    pub total_primary: usize,
    pub total_secondary: usize,
    /// Secondary records folded in by title; several may share one slot.
    pub merged_exact: usize,
    pub merged_fuzzy: usize,
    pub primary_only: usize,
    pub secondary_only: usize,
    pub conflicts: usize,
    pub duplicates_dropped: usize,
    pub emitted: usize,
}

/// Output of a completed run.
#[derive(Debug)]
pub struct ReconcileResult {
    /// Unified catalog: primary records first, then unmatched secondary ones.
    pub records: Vec<GameRecord>,
    /// Match state of each primary record, aligned with the front of `records`.
    pub match_states: Vec<MatchState>,
    pub audit: AuditLog,
    pub stats: ReconcileStats,
}

/// Drives one reconciliation run.
pub struct Reconciler<'p> {
    options: ReconcileOptions,
    progress: &'p dyn ReconcileProgress,
    state: RunState,
}

impl<'p> Reconciler<'p> {
    pub fn new(options: ReconcileOptions) -> Self {
        Self {
            options,
            progress: &SilentProgress,
            state: RunState::Indexing,
        }
    }

    pub fn with_progress(mut self, progress: &'p dyn ReconcileProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Reconcile two record streams.
    ///
    /// `None` means the source is absent; the other one is passed through
    /// unmerged. Both absent is an error.
    pub fn run<A, B, EA, EB>(
        &mut self,
        primary: Option<A>,
        secondary: Option<B>,
    ) -> Result<ReconcileResult, ReconcileError>
    where
        A: IntoIterator<Item = Result<GameRecord, EA>>,
        B: IntoIterator<Item = Result<GameRecord, EB>>,
        EA: fmt::Display,
        EB: fmt::Display,
    {
        let result = self.run_phases(primary, secondary);
        self.state = if result.is_ok() {
            RunState::Done
        } else {
            RunState::Aborted
        };
        result
    }

    fn run_phases<A, B, EA, EB>(
        &mut self,
        primary: Option<A>,
        secondary: Option<B>,
    ) -> Result<ReconcileResult, ReconcileError>
    where
        A: IntoIterator<Item = Result<GameRecord, EA>>,
        B: IntoIterator<Item = Result<GameRecord, EB>>,
        EA: fmt::Display,
        EB: fmt::Display,
    {
        if primary.is_none() && secondary.is_none() {
            return Err(ReconcileError::NoSources);
        }

        let mut stats = ReconcileStats::default();
        let mut audit = AuditLog::new(self.options.report_title.clone());

        // ── Indexing ──
        self.state = RunState::Indexing;
        self.progress.on_phase("Indexing primary catalog...");
        let mut index = PrimaryIndex::new(self.options.duplicates);
        match primary {
            Some(records) => {
                for (position, record) in records.into_iter().enumerate() {
                    let record = record.map_err(|e| ReconcileError::Source {
                        side: Side::Primary,
                        position: position + 1,
                        message: e.to_string(),
                    })?;
                    stats.total_primary += 1;
                    index_record(&mut index, record, &mut audit);
                }
            }
            None => log::warn!("Primary catalog missing; passing secondary records through"),
        }
        stats.duplicates_dropped = index.duplicates_dropped();
        log::debug!(
            "Indexed {} primary records under {} keys",
            index.len(),
            index.key_count()
        );

        // ── Exact pass ──
        self.state = RunState::ExactPass;
        self.progress.on_phase("Exact pass: matching by normalized title...");
        let policy = &self.options.policy;
        let mut states = vec![MatchState::Unmatched; index.len()];
        let mut orphans = Vec::new();
        match secondary {
            Some(records) => {
                for (position, record) in records.into_iter().enumerate() {
                    let record = record.map_err(|e| ReconcileError::Source {
                        side: Side::Secondary,
                        position: position + 1,
                        message: e.to_string(),
                    })?;
                    stats.total_secondary += 1;

                    let Some(slot) = index.get(&record.title_key()) else {
                        orphans.push(record);
                        continue;
                    };

                    // A slot that already absorbed a secondary record is
                    // validated against its merged form and can absorb more.
                    let base = index.record(slot);
                    match same_entity(policy, base, &record) {
                        Verdict::Same(_) => {
                            let merged = merge_records(base, &record, &policy.canonical_store);
                            index.replace(slot, merged);
                            states[slot] = MatchState::MergedExact;
                            stats.merged_exact += 1;
                        }
                        Verdict::Different(reason) => {
                            log::debug!("\"{}\": title collision refused ({})", record.title, reason);
                            audit.add(AuditEntry::Rejected {
                                primary: RecordSummary::from(base),
                                secondary: RecordSummary::from(&record),
                                reason,
                            });
                            stats.conflicts += 1;
                            orphans.push(record);
                        }
                    }
                }
            }
            None => log::warn!("Secondary catalog missing; passing primary records through"),
        }

        // ── Fuzzy pass ──
        self.state = RunState::FuzzyPass;
        let secondary_only = if policy.fuzzy_pass && !orphans.is_empty() {
            let unclaimed = index
                .indexed_slots()
                .filter(|&slot| states[slot] == MatchState::Unmatched);
            let mut matcher = FuzzyMatcher::new(policy, &index, unclaimed);
            self.progress.on_phase(&format!(
                "Fuzzy pass: {} orphans against {} unmatched candidates...",
                orphans.len(),
                matcher.remaining()
            ));

            let total = orphans.len();
            let mut unmatched = Vec::new();
            for (i, orphan) in orphans.into_iter().enumerate() {
                match matcher.find(&orphan) {
                    Some(slot) => {
                        let base = index.record(slot);
                        log::debug!("Fuzzy merge: \"{}\" <- \"{}\"", base.title, orphan.title);
                        audit.add(AuditEntry::FuzzyMerge {
                            primary: RecordSummary::from(base),
                            secondary: RecordSummary::from(&orphan),
                        });
                        let merged = merge_records(base, &orphan, &policy.canonical_store);
                        index.replace(slot, merged);
                        states[slot] = MatchState::MergedFuzzy;
                        stats.merged_fuzzy += 1;
                    }
                    None => unmatched.push(orphan),
                }
                self.progress.on_fuzzy_progress(i + 1, total, stats.merged_fuzzy);
            }
            unmatched
        } else {
            orphans
        };

        // ── Emit ──
        self.state = RunState::Emit;
        self.progress.on_phase("Emitting unified catalog...");
        stats.primary_only = states
            .iter()
            .filter(|&&s| s == MatchState::Unmatched)
            .count();
        stats.secondary_only = secondary_only.len();

        let mut records = index.into_records();
        records.extend(secondary_only);
        for record in &mut records {
            clean_gallery(record);
        }

        let expected = stats.total_primary.saturating_sub(stats.duplicates_dropped)
            + stats
                .total_secondary
                .saturating_sub(stats.merged_exact + stats.merged_fuzzy);
        if records.len() != expected {
            return Err(ReconcileError::CountMismatch {
                emitted: records.len(),
                expected,
            });
        }
        stats.emitted = records.len();

        self.progress.on_complete(&format!(
            "Reconciliation complete: {} records ({} exact, {} fuzzy merges)",
            stats.emitted, stats.merged_exact, stats.merged_fuzzy
        ));

        Ok(ReconcileResult {
            records,
            match_states: states,
            audit,
            stats,
        })
    }
}

/// Insert one primary record, auditing same-source key collisions.
fn index_record(index: &mut PrimaryIndex, record: GameRecord, audit: &mut AuditLog) {
    let summary = RecordSummary::from(&record);
    if let Insertion::Duplicate { existing, kept } = index.insert(record) {
        audit.add(AuditEntry::DuplicateKey {
            kept: RecordSummary::from(index.record(existing)),
            duplicate: summary,
            emitted: kept.is_some(),
        });
    }
}

/// Reconcile two fully loaded catalogs with the given options.
pub fn reconcile(
    primary: Vec<GameRecord>,
    secondary: Vec<GameRecord>,
    options: ReconcileOptions,
) -> Result<ReconcileResult, ReconcileError> {
    Reconciler::new(options).run(
        Some(primary.into_iter().map(Ok::<_, std::convert::Infallible>)),
        Some(secondary.into_iter().map(Ok::<_, std::convert::Infallible>)),
    )
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
