//! User settings for the `game-union` binary.
//!
//! Settings live in `~/.config/game-union/settings.toml`. Every table is
//! optional; a missing file means defaults throughout. Command-line flags
//! override whatever is loaded here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use game_union_merge::{DuplicatePolicy, MatchPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown duplicate mode '{0}' (expected \"drop\" or \"keep\")")]
    DuplicateMode(String),
    #[error("No profile named '{0}'")]
    UnknownProfile(String),
}

/// Canonical path to the settings file: `~/.config/game-union/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-union").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: PolicySettings,
    pub index: IndexSettings,
    pub profiles: BTreeMap<String, Profile>,
}

/// `[policy]`: thresholds handed to the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub near_release_years: u32,
    pub remake_gap_years: u32,
    pub fuzzy_year_window: u32,
    pub unknown_year_is_same: bool,
    pub canonical_store: String,
    pub fuzzy_pass: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        MatchPolicy::default().into()
    }
}

impl From<MatchPolicy> for PolicySettings {
    fn from(p: MatchPolicy) -> Self {
        Self {
            near_release_years: p.near_release_years,
            remake_gap_years: p.remake_gap_years,
            fuzzy_year_window: p.fuzzy_year_window,
            unknown_year_is_same: p.unknown_year_is_same,
            canonical_store: p.canonical_store,
            fuzzy_pass: p.fuzzy_pass,
        }
    }
}

impl From<&PolicySettings> for MatchPolicy {
    fn from(s: &PolicySettings) -> Self {
        Self {
            near_release_years: s.near_release_years,
            remake_gap_years: s.remake_gap_years,
            fuzzy_year_window: s.fuzzy_year_window,
            unknown_year_is_same: s.unknown_year_is_same,
            canonical_store: s.canonical_store.clone(),
            fuzzy_pass: s.fuzzy_pass,
        }
    }
}

/// `[index]`: how the primary index treats repeated keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub duplicates: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default().as_str().to_string(),
        }
    }
}

impl IndexSettings {
    pub fn duplicate_policy(&self) -> Result<DuplicatePolicy, SettingsError> {
        DuplicatePolicy::from_str_loose(&self.duplicates)
            .ok_or_else(|| SettingsError::DuplicateMode(self.duplicates.clone()))
    }
}

/// `[profiles.<name>]`: a named merge job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

impl Profile {
    /// Built-in jobs, relative to the working directory.
    ///
    /// `global` unifies the released catalogs, `upcoming` the
    /// coming-soon ones.
    pub fn builtin(name: &str) -> Option<Self> {
        let (primary, secondary, output, report) = match name {
            "global" => (
                "steam_games.json",
                "rawg_games.json",
                "global_games.json",
                "conflicts_report.txt",
            ),
            "upcoming" => (
                "steam_upcoming_games.json",
                "rawg_upcoming_games.json",
                "global_upcoming_games.json",
                "conflicts_report_upcoming.txt",
            ),
            _ => return None,
        };
        Some(Self {
            primary: primary.into(),
            secondary: secondary.into(),
            output: output.into(),
            report: Some(report.into()),
        })
    }
}

impl Settings {
    /// Load settings from the canonical path.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings file at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Look up a profile, preferring user-defined ones over the built-ins.
    pub fn profile(&self, name: &str) -> Result<Profile, SettingsError> {
        self.profiles
            .get(name)
            .cloned()
            .or_else(|| Profile::builtin(name))
            .ok_or_else(|| SettingsError::UnknownProfile(name.to_string()))
    }

    /// Names of every profile `profile` can resolve, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        for builtin in ["global", "upcoming"] {
            if !self.profiles.contains_key(builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        names
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
