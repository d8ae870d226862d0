//! Field-level merge policy for a matched pair of records.
//!
//! The primary (source A) record is the base; the secondary record only adds
//! information. Nothing already on the base is removed, scalar conflicts
//! resolve by fixed rules, and list fields become case-insensitive unions.

use std::collections::HashSet;

use game_union_core::{GameRecord, ReleaseDate, StoreListing, Video};

use crate::gallery::clean_gallery;

/// Combine a matched pair into one record.
///
/// `canonical_store` names the storefront the base catalog itself comes
/// from; listings for it on the incoming side are discarded so the same
/// store never appears under two identities.
pub fn merge_records(base: &GameRecord, incoming: &GameRecord, canonical_store: &str) -> GameRecord {
    let mut merged = base.clone();

    merged.release_date = merge_release_date(&base.release_date, &incoming.release_date);
    merged.metacritic = base.metacritic.max(incoming.metacritic);

    union_case_insensitive(&mut merged.platforms, &incoming.platforms);
    union_case_insensitive(&mut merged.genres, &incoming.genres);
    union_case_insensitive(&mut merged.gallery, &incoming.gallery);
    union_case_insensitive(&mut merged.developers, &incoming.developers);
    union_case_insensitive(&mut merged.publishers, &incoming.publishers);
    union_case_insensitive(&mut merged.languages.voices, &incoming.languages.voices);
    union_case_insensitive(&mut merged.languages.texts, &incoming.languages.texts);

    merge_stores(&mut merged.stores, &incoming.stores, canonical_store);
    merge_videos(&mut merged.videos, &incoming.videos);

    fill_if_empty(&mut merged.slug, &incoming.slug);
    fill_if_empty(&mut merged.short_description, &incoming.short_description);
    fill_if_empty(&mut merged.storage, &incoming.storage);
    fill_if_empty(&mut merged.primary_image, &incoming.primary_image);
    if merged.required_age == 0 {
        merged.required_age = incoming.required_age;
    }

    clean_gallery(&mut merged);
    merged
}

/// Pick the release date for a merged record.
///
/// A concrete date beats a placeholder. Between two concrete dates the
/// earlier one wins, compared as text so ISO dates order chronologically
/// and unparseable raw values still compare deterministically.
pub fn merge_release_date(base: &ReleaseDate, incoming: &ReleaseDate) -> ReleaseDate {
    match (base.is_concrete(), incoming.is_concrete()) {
        (false, true) => incoming.clone(),
        (true, true) if incoming.to_string() < base.to_string() => incoming.clone(),
        _ => base.clone(),
    }
}

/// Append incoming values not already present, ignoring case.
///
/// Base order is preserved and case-duplicates within either side collapse
/// onto their first occurrence.
pub fn union_case_insensitive(base: &mut Vec<String>, incoming: &[String]) {
    let mut seen = HashSet::with_capacity(base.len() + incoming.len());
    base.retain(|item| seen.insert(item.to_lowercase()));
    for item in incoming {
        if seen.insert(item.to_lowercase()) {
            base.push(item.clone());
        }
    }
}

/// Append incoming store listings for stores the base does not list yet.
///
/// Stores are keyed by case-insensitive name only; a second listing for the
/// same store with a different external id is still a duplicate.
pub fn merge_stores(base: &mut Vec<StoreListing>, incoming: &[StoreListing], canonical_store: &str) {
    let canonical = canonical_store.to_lowercase();
    let mut seen: HashSet<String> = base.iter().map(|s| s.store.to_lowercase()).collect();
    for listing in incoming {
        let name = listing.store.to_lowercase();
        if name == canonical || seen.contains(&name) {
            continue;
        }
        seen.insert(name);
        base.push(listing.clone());
    }
}

fn merge_videos(base: &mut Vec<Video>, incoming: &[Video]) {
    let mut seen: HashSet<String> = base.iter().map(|v| v.url.clone()).collect();
    for video in incoming {
        if !video.url.is_empty() && seen.insert(video.url.clone()) {
            base.push(video.clone());
        }
    }
}

fn fill_if_empty(base: &mut String, incoming: &str) {
    if base.trim().is_empty() && !incoming.trim().is_empty() {
        *base = incoming.to_string();
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
