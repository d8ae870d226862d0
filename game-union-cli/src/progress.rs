//! Terminal progress display for reconciliation runs.

use game_union_merge::{LogProgress, ReconcileProgress};
use indicatif::{ProgressBar, ProgressStyle};

/// Shows phases on a spinner and the fuzzy pass as a progress bar.
pub(crate) struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    /// When `quiet` is true the bar is hidden and phases go to the log.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };
        Self { pb }
    }
}

impl Drop for BarProgress {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}

impl ReconcileProgress for BarProgress {
    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
        self.pb.set_message(message.to_string());
    }

    fn on_fuzzy_progress(&self, current: usize, total: usize, merges: usize) {
        if current == 1 {
            self.pb.disable_steady_tick();
            self.pb.set_length(total as u64);
            self.pb.set_style(
                ProgressStyle::with_template("  [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("static pattern")
                    .progress_chars("=> "),
            );
        }
        self.pb.set_position(current as u64);
        self.pb.set_message(format!("fuzzy merges: {merges}"));
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::debug!("{}", message);
    }
}

/// Run `f` with the progress reporter matching the output mode: plain log
/// lines when verbose, a live bar otherwise.
pub(crate) fn with_progress<T>(
    quiet: bool,
    verbose: bool,
    f: impl FnOnce(&dyn ReconcileProgress) -> T,
) -> T {
    if verbose {
        f(&LogProgress)
    } else {
        f(&BarProgress::new(quiet))
    }
}
