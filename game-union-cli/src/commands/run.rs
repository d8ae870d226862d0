use game_union_cli::Settings;

use crate::cli_types::PolicyArgs;
use crate::commands::merge::{MergeJob, execute, print_summary, resolve_options};
use crate::error::CliError;
use crate::progress::with_progress;

/// Run the `run <profile>` command.
pub(crate) fn run_profile(
    name: &str,
    args: &PolicyArgs,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let profile = settings.profile(name)?;
    log::debug!(
        "Profile '{}': {} + {} -> {}",
        name,
        profile.primary.display(),
        profile.secondary.display(),
        profile.output.display()
    );

    let job = MergeJob {
        primary: profile.primary,
        secondary: profile.secondary,
        output: profile.output,
        report: profile.report,
    };
    let options = resolve_options(&settings, args, &job.output)?;
    let result = with_progress(quiet, verbose, |progress| execute(&job, options, progress))?;
    print_summary(&job, &result);
    Ok(())
}
