//! File-level plumbing for the `game-union` binary: catalog I/O and
//! user settings.

pub mod catalog_io;
pub mod settings;

pub use catalog_io::{
    CatalogIoError, StagedFile, commit_all, read_catalog, stage_catalog, stage_report,
};
pub use settings::{IndexSettings, PolicySettings, Profile, Settings, SettingsError, settings_path};
