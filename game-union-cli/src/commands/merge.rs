use std::convert::Infallible;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_union_cli::{Settings, commit_all, read_catalog, stage_catalog, stage_report};
use game_union_merge::{
    DuplicatePolicy, MatchPolicy, ReconcileOptions, ReconcileProgress, ReconcileResult, Reconciler,
};

use crate::cli_types::PolicyArgs;
use crate::error::CliError;
use crate::progress::with_progress;

/// Input and output paths for one merge.
pub(crate) struct MergeJob {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
}

/// Build run options from settings, with command-line flags taking priority.
pub(crate) fn resolve_options(
    settings: &Settings,
    args: &PolicyArgs,
    output: &Path,
) -> Result<ReconcileOptions, CliError> {
    let mut policy = MatchPolicy::from(&settings.policy);
    if let Some(years) = args.near_years {
        policy.near_release_years = years;
    }
    if let Some(years) = args.remake_years {
        policy.remake_gap_years = years;
    }
    if let Some(years) = args.fuzzy_years {
        policy.fuzzy_year_window = years;
    }
    if let Some(store) = &args.canonical_store {
        policy.canonical_store = store.clone();
    }
    if args.no_fuzzy {
        policy.fuzzy_pass = false;
    }
    if args.strict_years {
        policy.unknown_year_is_same = false;
    }
    if policy.near_release_years >= policy.remake_gap_years {
        return Err(CliError::config(format!(
            "near-release gap ({}) must be smaller than the remake gap ({})",
            policy.near_release_years, policy.remake_gap_years
        )));
    }

    let duplicates = match &args.mode {
        Some(mode) => DuplicatePolicy::from_str_loose(mode).ok_or_else(|| {
            CliError::config(format!("unknown mode '{mode}' (expected drop or keep)"))
        })?,
        None => settings.index.duplicate_policy()?,
    };

    let report_title = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());

    Ok(ReconcileOptions {
        policy,
        duplicates,
        report_title,
    })
}

/// Read both catalogs, reconcile, and commit the outputs.
///
/// Nothing is written unless the whole run succeeds.
pub(crate) fn execute(
    job: &MergeJob,
    options: ReconcileOptions,
    progress: &dyn ReconcileProgress,
) -> Result<ReconcileResult, CliError> {
    let primary = read_catalog(&job.primary)?;
    let secondary = read_catalog(&job.secondary)?;

    let result = Reconciler::new(options).with_progress(progress).run(
        primary.map(|records| records.into_iter().map(Ok::<_, Infallible>)),
        secondary.map(|records| records.into_iter().map(Ok::<_, Infallible>)),
    )?;

    let mut staged = vec![stage_catalog(&job.output, &result.records)?];
    if let Some(report) = &job.report {
        staged.push(stage_report(report, &result.audit)?);
    }
    commit_all(staged)?;

    Ok(result)
}

/// Run the `merge` command.
pub(crate) fn run_merge(
    job: MergeJob,
    args: &PolicyArgs,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let options = resolve_options(&settings, args, &job.output)?;
    let result = with_progress(quiet, verbose, |progress| execute(&job, options, progress))?;
    print_summary(&job, &result);
    Ok(())
}

pub(crate) fn print_summary(job: &MergeJob, result: &ReconcileResult) {
    let stats = &result.stats;

    log::info!(
        "{}",
        "Reconciliation complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Primary records:    {:>8}", stats.total_primary);
    log::info!("  Secondary records:  {:>8}", stats.total_secondary);
    log::info!("  Exact merges:       {:>8}", stats.merged_exact);
    log::info!("  Fuzzy merges:       {:>8}", stats.merged_fuzzy);
    log::info!("  Primary only:       {:>8}", stats.primary_only);
    log::info!("  Secondary only:     {:>8}", stats.secondary_only);
    if stats.conflicts > 0 {
        log::info!(
            "  Conflicts:          {:>8}",
            stats.conflicts.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if stats.duplicates_dropped > 0 {
        log::info!("  Duplicates dropped: {:>8}", stats.duplicates_dropped);
    }
    log::info!(
        "  Total emitted:      {:>8}",
        stats.emitted.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("");
    log::info!(
        "  Catalog: {}",
        job.output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if let Some(report) = &job.report {
        log::info!(
            "  Report:  {}",
            report.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}
