//! Forgiving deserializers for provider-produced records.
//!
//! Collectors scrape loosely structured sources, so a field may come back as
//! `null`, as a number where a string was expected, or as garbage. A single
//! bad field must not reject the whole record: these helpers fall back to
//! the field's empty value instead of erroring.

use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeList<T> {
    Items(Vec<MaybeItem<T>>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeItem<T> {
    Item(T),
    Other(IgnoredAny),
}

/// A scalar read as text: strings verbatim, numbers formatted, anything
/// else (null, objects, arrays, booleans) as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LenientString(pub Option<String>);

impl<'de> Deserialize<'de> for LenientString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match Scalar::deserialize(deserializer)? {
            Scalar::Text(s) => Some(s),
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Bool(_) | Scalar::Other(_) => None,
        };
        Ok(Self(text))
    }
}

/// Deserialize a string field, treating null and non-scalars as empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(LenientString::deserialize(deserializer)?.0.unwrap_or_default())
}

/// Deserialize a non-negative score, treating anything unparseable as 0.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        Scalar::Float(f) if f.is_finite() && f > 0.0 => f.min(u32::MAX as f64) as u32,
        Scalar::Text(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(n)
}

/// Deserialize a flag, accepting booleans, `"true"`/`"false"` and 0/1.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let b = match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => b,
        Scalar::Int(n) => n != 0,
        Scalar::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    };
    Ok(b)
}

/// Deserialize a list of strings, skipping empty or non-scalar entries.
///
/// A value that is not an array at all yields an empty list.
pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items: Vec<LenientString> = list(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|s| s.0)
        .filter(|s| !s.trim().is_empty())
        .collect())
}

/// Deserialize a list of structured items, skipping entries that do not
/// have the expected shape.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = match MaybeList::<T>::deserialize(deserializer)? {
        MaybeList::Items(items) => items
            .into_iter()
            .filter_map(|item| match item {
                MaybeItem::Item(t) => Some(t),
                MaybeItem::Other(_) => None,
            })
            .collect(),
        MaybeList::Other(_) => Vec::new(),
    };
    Ok(items)
}

/// Deserialize a structured value, falling back to its default when the
/// input has the wrong shape.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match MaybeItem::<T>::deserialize(deserializer)? {
        MaybeItem::Item(t) => Ok(t),
        MaybeItem::Other(_) => Ok(T::default()),
    }
}
