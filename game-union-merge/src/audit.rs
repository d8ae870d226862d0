//! Human-review log of non-trivial reconciliation decisions.
//!
//! Every title collision the validator refused and every fuzzy merge ends up
//! here, so someone can skim the report and spot bad calls. The log is a
//! sink: nothing in the engine reads it back.

use std::fmt;
use std::io::{self, Write};

use game_union_core::GameRecord;

use crate::validate::Mismatch;

/// The identifying bits of a record, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub title: String,
    pub kind: String,
    pub release_date: String,
}

impl From<&GameRecord> for RecordSummary {
    fn from(record: &GameRecord) -> Self {
        Self {
            title: record.title.clone(),
            kind: record.kind.to_string(),
            release_date: record.release_date.to_string(),
        }
    }
}

impl fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = if self.release_date.is_empty() {
            "no date"
        } else {
            &self.release_date
        };
        write!(f, "\"{}\" ({}, {})", self.title, self.kind, date)
    }
}

/// A single entry in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEntry {
    /// Same title key, but the validator says these are different games.
    Rejected {
        primary: RecordSummary,
        secondary: RecordSummary,
        reason: Mismatch,
    },
    /// Merged by the fuzzy pass.
    FuzzyMerge {
        primary: RecordSummary,
        secondary: RecordSummary,
    },
    /// A second primary record with an already indexed title key.
    DuplicateKey {
        kept: RecordSummary,
        duplicate: RecordSummary,
        emitted: bool,
    },
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                primary,
                secondary,
                reason,
            } => write!(f, "[CONFLICT] {}: A={} | B={}", reason, primary, secondary),
            Self::FuzzyMerge { primary, secondary } => {
                write!(f, "[FUZZY MERGE] A={} | B={}", primary, secondary)
            }
            Self::DuplicateKey {
                kept,
                duplicate,
                emitted,
            } => {
                let action = if *emitted { "kept unindexed" } else { "dropped" };
                write!(f, "[DUPLICATE] A={} {} (key owned by A={})", duplicate, action, kept)
            }
        }
    }
}

/// Counts of each entry type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditSummary {
    pub conflicts: usize,
    pub fuzzy_merges: usize,
    pub duplicates: usize,
}

/// Collects audit entries and renders the plain-text report.
#[derive(Debug, Default)]
pub struct AuditLog {
    title: String,
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> AuditSummary {
        let mut summary = AuditSummary::default();
        for entry in &self.entries {
            match entry {
                AuditEntry::Rejected { .. } => summary.conflicts += 1,
                AuditEntry::FuzzyMerge { .. } => summary.fuzzy_merges += 1,
                AuditEntry::DuplicateKey { .. } => summary.duplicates += 1,
            }
        }
        summary
    }

    /// Write the report: a short header, then one line per entry.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        let summary = self.summary();

        writeln!(out, "=== Reconciliation Report: {} ===", self.title)?;
        writeln!(
            out,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            out,
            "Conflicts: {} | Fuzzy merges: {} | Duplicate keys: {}",
            summary.conflicts, summary.fuzzy_merges, summary.duplicates
        )?;
        writeln!(out)?;

        for entry in &self.entries {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/audit_tests.rs"]
mod tests;
