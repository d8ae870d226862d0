//! game-union CLI
//!
//! Merges a primary and a secondary game catalog into one unified catalog
//! plus a plain-text conflict report.

mod cli_types;
mod commands;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_show};
use commands::merge::{MergeJob, run_merge};
use commands::run::run_profile;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Merge {
            primary,
            secondary,
            output,
            report,
            policy,
        } => {
            let job = MergeJob {
                primary,
                secondary,
                output,
                report,
            };
            run_merge(job, &policy, cli.quiet, cli.verbose)
        }
        Commands::Run { profile, policy } => {
            run_profile(&profile, &policy, cli.quiet, cli.verbose)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Plain messages at info level, level-tagged lines for everything else.
/// `RUST_LOG` still overrides the default filter.
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "[{}] {}", record.level(), record.args())
            }
        })
        .init();
}
