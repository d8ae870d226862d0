//! Reconciliation progress reporting.

/// Trait for receiving reconciliation progress updates.
pub trait ReconcileProgress {
    /// Called when a phase starts (e.g., "Exact pass").
    fn on_phase(&self, message: &str);

    /// Called after each orphan is processed during the fuzzy pass.
    fn on_fuzzy_progress(&self, current: usize, total: usize, merges: usize);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ReconcileProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_fuzzy_progress(&self, _current: usize, _total: usize, _merges: usize) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ReconcileProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_fuzzy_progress(&self, current: usize, total: usize, merges: usize) {
        if current.is_multiple_of(1000) || current == total {
            log::info!("  [{}/{}] fuzzy merges: {}", current, total, merges);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
