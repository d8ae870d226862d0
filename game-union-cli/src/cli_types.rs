//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "game-union")]
#[command(about = "Merge two game catalogs into one deduplicated catalog", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Matching overrides shared by `merge` and `run`. Unset flags fall back to
/// the `[policy]` and `[index]` tables in settings.toml.
#[derive(Args, Clone, Default)]
pub(crate) struct PolicyArgs {
    /// What to do with primary records whose title is already indexed (drop, keep)
    #[arg(long)]
    pub mode: Option<String>,

    /// Year gap still considered the same release
    #[arg(long)]
    pub near_years: Option<u32>,

    /// Year gap at which a shared title is treated as a different game
    #[arg(long)]
    pub remake_years: Option<u32>,

    /// Maximum year gap for fuzzy matches
    #[arg(long)]
    pub fuzzy_years: Option<u32>,

    /// Store that the primary catalog comes from
    #[arg(long)]
    pub canonical_store: Option<String>,

    /// Skip the fuzzy second pass
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Refuse exact-title merges when either release year is unknown
    #[arg(long)]
    pub strict_years: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge a secondary catalog into a primary one
    Merge {
        /// Primary catalog (JSON array); its records win on conflicts
        #[arg(long)]
        primary: PathBuf,

        /// Secondary catalog (JSON array)
        #[arg(long)]
        secondary: PathBuf,

        /// Where to write the unified catalog
        #[arg(short, long)]
        output: PathBuf,

        /// Where to write the conflict report
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Run a named merge profile from settings (built-in: global, upcoming)
    Run {
        /// Profile name
        profile: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and available profiles
    Show,

    /// Print the settings file path
    Path,
}
