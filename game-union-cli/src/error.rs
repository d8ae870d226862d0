use game_union_cli::{CatalogIoError, SettingsError};
use game_union_merge::ReconcileError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading an input or writing an output failed
    #[error("{0}")]
    Catalog(#[from] CatalogIoError),

    /// Settings file could not be loaded
    #[error("{0}")]
    Settings(#[from] SettingsError),

    /// The reconciliation run aborted
    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Invalid command-line configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
