use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_union_cli::{Settings, settings_path};

use crate::error::CliError;

/// Show the effective settings and the profiles that can be run.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = Settings::load_from(&path)?;

    log::info!(
        "{}",
        "game-union Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    for line in settings.to_toml_string()?.lines() {
        log::info!("  {}", line);
    }
    log::info!("");

    log::info!("  {}", "Profiles:".if_supports_color(Stdout, |t| t.bold()));
    for name in settings.profile_names() {
        let profile = settings.profile(&name)?;
        log::info!(
            "    {:<10} {} + {} -> {}",
            name.if_supports_color(Stdout, |t| t.cyan()),
            profile.primary.display(),
            profile.secondary.display(),
            profile.output.display(),
        );
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
