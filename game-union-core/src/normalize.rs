//! Title normalization used as the lossy join key between catalogs.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Reduce a title to its lowercase Unicode letters and digits.
///
/// Punctuation, whitespace, symbols and combining marks are dropped, so
/// `"Half-Life 2: Episode One"` and `"half life 2 episode one"` share the key
/// `"halflife2episodeone"`. The key is intentionally lossy: unrelated games
/// with the same letters collide, and callers decide what to do about it.
///
/// # Examples
///
/// ```
/// use game_union_core::normalize_title;
///
/// assert_eq!(normalize_title("The Witcher® 3: Wild Hunt"), "thewitcher3wildhunt");
/// assert_eq!(normalize_title("  "), "");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|&c| is_letter_or_digit(c))
        .flat_map(char::to_lowercase)
        .filter(|&c| is_letter_or_digit(c))
        .collect()
}

/// Letters (`L*`) and decimal digits (`Nd`) only. Superscripts, fractions,
/// letter-like numerals and combining marks are not part of the key.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Whether two company names plausibly refer to the same studio.
///
/// Both names are normalized like titles; they are similar when equal or when
/// one contains the other ("Acme" vs "Acme Studios"). Names that normalize to
/// nothing are never similar to anything.
pub fn names_similar(a: &str, b: &str) -> bool {
    keys_similar(&normalize_title(a), &normalize_title(b))
}

/// [`names_similar`] for keys that are already normalized.
pub fn keys_similar(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
