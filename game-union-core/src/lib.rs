//! Game catalog record model and title normalization.
//!
//! This crate defines the record shape shared by both data providers and the
//! reconciled output, without any I/O. The reconciliation engine in
//! `game-union-merge` and the CLI both build on these types.

pub mod kind;
pub mod lenient;
pub mod normalize;
pub mod record;
pub mod release_date;

pub use kind::EntityKind;
pub use normalize::{keys_similar, names_similar, normalize_title};
pub use record::{GameRecord, Languages, StoreListing, Video};
pub use release_date::ReleaseDate;
