use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lenient::LenientString;

/// What kind of catalog entry a record describes.
///
/// Providers report this as free text; anything other than `game` or `dlc`
/// is kept (lowercased) so two records with the same unusual kind still
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "LenientString", into = "String")]
pub enum EntityKind {
    #[default]
    Game,
    Dlc,
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Game => "game",
            Self::Dlc => "dlc",
            Self::Other(s) => s,
        }
    }

    /// Parse a provider's kind string, case-insensitively.
    ///
    /// Blank input falls back to [`EntityKind::Game`], the providers' default.
    pub fn from_str_loose(s: &str) -> Self {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "" | "game" => Self::Game,
            "dlc" => Self::Dlc,
            _ => Self::Other(s),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LenientString> for EntityKind {
    fn from(s: LenientString) -> Self {
        s.0.as_deref().map(Self::from_str_loose).unwrap_or_default()
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}
