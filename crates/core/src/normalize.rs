//! Turkish locale normalizer.
//!
//! Two independent products come out of a display name:
//! - a **slug** ([`normalize`]): lowercase ASCII, hyphen separated, used as a
//!   stable URL identifier and stored next to the display name;
//! - a **search pattern** ([`fold_for_search`]): one equivalence class per
//!   query character, tested against raw stored text.
//!
//! [`compare_turkish`] orders display names by the Turkish alphabet.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::error::{DirectoryError, Result};

/// Fixed one-to-one map from Turkish letters to their base-Latin equivalent.
///
/// `I` is listed because the Turkish uppercase of `ı` is `I`; folding it here
/// keeps `normalize("ISPARTA")` and `normalize("Isparta")` equal.
const TURKISH_BASE: [(char, char); 13] = [
    ('İ', 'i'),
    ('I', 'i'),
    ('ı', 'i'),
    ('Ş', 's'),
    ('ş', 's'),
    ('Ğ', 'g'),
    ('ğ', 'g'),
    ('Ü', 'u'),
    ('ü', 'u'),
    ('Ö', 'o'),
    ('ö', 'o'),
    ('Ç', 'c'),
    ('ç', 'c'),
];

/// Turkish alphabet order, plus the Latin letters absent from it.
const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

fn turkish_base(c: char) -> Option<char> {
    TURKISH_BASE.iter().find(|(from, _)| *from == c).map(|&(_, to)| to)
}

/// Convert a display name into a URL-safe slug.
///
/// Pure and total: empty or symbol-only input yields an empty string, which
/// callers on the write path must reject (see [`normalize_name`]).
///
/// ```
/// use postakod_core::normalize;
///
/// assert_eq!(normalize("İstanbul"), "istanbul");
/// assert_eq!(normalize("  Kadıköy / Acıbadem Mah. "), "kadikoy-acibadem-mah");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let composed: String = text.trim().nfc().collect();
    let mut slug = String::with_capacity(composed.len());
    let mut pending_hyphen = false;

    for ch in composed.chars() {
        let base = turkish_base(ch).unwrap_or(ch).to_ascii_lowercase();
        if base.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(base);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Fail-fast variant of [`normalize`] for the write path.
pub fn normalize_name(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(DirectoryError::InvalidInput("name must not be empty".to_owned()));
    }
    let slug = normalize(text);
    if slug.is_empty() {
        return Err(DirectoryError::InvalidInput(format!(
            "name '{}' has no letters or digits",
            text.trim()
        )));
    }
    Ok(slug)
}

/// Canonical representative of the equivalence class `c` belongs to.
///
/// Turkish letter variants collapse onto their base letter, everything else
/// is lowercased when the lowercase form is a single character. Digits,
/// punctuation and whitespace are their own class.
#[must_use]
pub fn fold_char(c: char) -> char {
    if let Some(base) = turkish_base(c) {
        return base;
    }
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// One position of a [`SearchPattern`]: the set of characters equivalent to
/// the typed character, identified by its canonical representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass(char);

impl CharClass {
    #[must_use]
    pub fn of(c: char) -> Self {
        Self(fold_char(c))
    }

    #[must_use]
    pub fn representative(self) -> char {
        self.0
    }

    #[must_use]
    pub fn matches(self, c: char) -> bool {
        fold_char(c) == self.0
    }
}

/// Per-character equivalence pattern built from a free-text query.
///
/// Matching walks the stored text class by class; no regular expression is
/// ever assembled, so characters such as `.`, `*` or `'` in a query only
/// match themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    classes: Vec<CharClass>,
}

impl SearchPattern {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    /// Canonical form of the pattern: one representative per class.
    ///
    /// Storage backends use it to build a coarse prefilter; the pattern itself
    /// remains the authority on what matches.
    #[must_use]
    pub fn folded(&self) -> String {
        self.classes.iter().map(|c| c.representative()).collect()
    }

    /// Whether the pattern occurs anywhere in `haystack`.
    #[must_use]
    pub fn find_in(&self, haystack: &str) -> bool {
        if self.classes.is_empty() {
            return true;
        }
        let folded: Vec<char> = haystack.chars().map(fold_char).collect();
        if folded.len() < self.classes.len() {
            return false;
        }
        folded.windows(self.classes.len()).any(|window| self.window_matches(window))
    }

    /// Whether `haystack` starts with the pattern.
    #[must_use]
    pub fn is_prefix_of(&self, haystack: &str) -> bool {
        let mut chars = haystack.chars();
        self.classes.iter().all(|class| chars.next().is_some_and(|c| class.matches(c)))
    }

    fn window_matches(&self, window: &[char]) -> bool {
        self.classes.iter().zip(window).all(|(class, &c)| class.representative() == c)
    }
}

/// Expand a query into its per-character equivalence pattern.
#[must_use]
pub fn fold_for_search(text: &str) -> SearchPattern {
    let composed: String = text.nfc().collect();
    SearchPattern { classes: composed.chars().map(CharClass::of).collect() }
}

/// Turkish-aware lowercase of a single character.
fn turkish_lower(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        },
    }
}

/// Primary sort weight: whitespace, then ASCII punctuation, digits, letters
/// in Turkish alphabet order, and finally any other character by code point.
fn sort_weight(c: char) -> u32 {
    let c = turkish_lower(c);
    if c.is_whitespace() {
        return 0;
    }
    if let Some(digit) = c.to_digit(10) {
        return 200 + digit;
    }
    if let Some(pos) = TURKISH_ALPHABET.chars().position(|l| l == c) {
        return 300 + u32::try_from(pos).unwrap_or(0);
    }
    if c.is_ascii() {
        return 1 + u32::from(c);
    }
    1_000 + u32::from(c)
}

/// Compare two display names using Turkish alphabetical order.
///
/// Case is ignored at the primary level; exact string order breaks ties so
/// the ordering is total and deterministic.
#[must_use]
pub fn compare_turkish(a: &str, b: &str) -> Ordering {
    a.chars().map(sort_weight).cmp(b.chars().map(sort_weight)).then_with(|| a.cmp(b))
}
