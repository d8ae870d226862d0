//! The catalog record exchanged between collectors, the reconciliation
//! engine, and the unified output.
//!
//! Field names serialize in English; the Spanish keys written by the
//! original collectors are accepted as aliases so their output can be fed
//! in unchanged.

use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::lenient;
use crate::normalize::normalize_title;
use crate::release_date::ReleaseDate;

// ── Record ──────────────────────────────────────────────────────────────────

/// One game or DLC as described by a single provider (or by both, once
/// reconciled).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: String,
    #[serde(default, alias = "titulo", deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, alias = "tipo")]
    pub kind: EntityKind,
    #[serde(default, alias = "descripcion_corta", deserialize_with = "lenient::string")]
    pub short_description: String,
    #[serde(default, alias = "fecha_lanzamiento")]
    pub release_date: ReleaseDate,
    #[serde(default, deserialize_with = "lenient::string")]
    pub storage: String,
    /// Metacritic score; 0 when unknown.
    #[serde(default, deserialize_with = "lenient::number")]
    pub metacritic: u32,
    /// Minimum recommended age; 0 when unknown.
    #[serde(default, alias = "edad_recomendada", deserialize_with = "lenient::number")]
    pub required_age: u32,
    #[serde(default, alias = "plataformas", deserialize_with = "lenient::strings")]
    pub platforms: Vec<String>,
    #[serde(default, alias = "generos", deserialize_with = "lenient::strings")]
    pub genres: Vec<String>,
    #[serde(default, alias = "desarrolladores", deserialize_with = "lenient::strings")]
    pub developers: Vec<String>,
    #[serde(default, alias = "editores", deserialize_with = "lenient::strings")]
    pub publishers: Vec<String>,
    #[serde(default, alias = "img_principal", deserialize_with = "lenient::string")]
    pub primary_image: String,
    #[serde(default, alias = "galeria", deserialize_with = "lenient::strings")]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub videos: Vec<Video>,
    #[serde(default, alias = "idiomas", deserialize_with = "lenient::object")]
    pub languages: Languages,
    #[serde(default, alias = "tiendas", deserialize_with = "lenient::list")]
    pub stores: Vec<StoreListing>,
}

impl GameRecord {
    /// Convenience constructor for a record with only a title and kind.
    pub fn new(title: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// The normalized matching key for this record's title.
    pub fn title_key(&self) -> String {
        normalize_title(&self.title)
    }

    /// Release year, if known.
    pub fn year(&self) -> Option<i32> {
        self.release_date.year()
    }
}

// ── Store listing ───────────────────────────────────────────────────────────

/// Where a record can be bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreListing {
    #[serde(default, alias = "tienda", deserialize_with = "lenient::string")]
    pub store: String,
    #[serde(default, alias = "id_externo", deserialize_with = "lenient::string")]
    pub external_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_free: bool,
}

impl StoreListing {
    pub fn new(store: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            external_id: external_id.into(),
            ..Self::default()
        }
    }
}

// ── Media & languages ───────────────────────────────────────────────────────

/// A trailer or gameplay video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, alias = "titulo", deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub thumbnail: String,
}

/// Supported languages, split by audio and text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    #[serde(default, alias = "voces", deserialize_with = "lenient::strings")]
    pub voices: Vec<String>,
    #[serde(default, alias = "textos", deserialize_with = "lenient::strings")]
    pub texts: Vec<String>,
}

impl Languages {
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty() && self.texts.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
