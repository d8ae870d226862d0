//! Catalog reconciliation engine.
//!
//! This crate owns all matching and merge logic: indexing the primary
//! catalog by normalized title, validating title collisions, fuzzy matching
//! the leftovers, merging matched pairs field by field, and auditing every
//! non-trivial decision. It works on in-memory record streams only; reading
//! and writing catalogs is the caller's job.

pub mod audit;
pub mod fuzzy;
pub mod gallery;
pub mod index;
pub mod policy;
pub mod progress;
pub mod reconcile;
pub mod resolve;
pub mod validate;

pub use audit::{AuditEntry, AuditLog, AuditSummary, RecordSummary};
pub use fuzzy::{FuzzyMatcher, is_fuzzy_match};
pub use gallery::clean_gallery;
pub use index::{Insertion, PrimaryIndex};
pub use policy::{DuplicatePolicy, MatchPolicy};
pub use progress::{LogProgress, ReconcileProgress, SilentProgress};
pub use reconcile::{
    MatchState, ReconcileError, ReconcileOptions, ReconcileResult, ReconcileStats, Reconciler,
    RunState, Side, reconcile,
};
pub use resolve::{merge_records, merge_release_date, merge_stores, union_case_insensitive};
pub use validate::{Mismatch, SameReason, Verdict, same_entity};
