use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Canonical form of a token: lowercase, then strip accents.
///
/// Pure and idempotent; the result is the aggregation key for the frequency table.
pub fn normalize(token: &str) -> String {
    let lower = token.to_lowercase();
    strip_nonspacing_marks(&lower)
}

/// NFD, drop every nonspacing mark, recompose to NFC.
pub fn strip_nonspacing_marks(s: &str) -> String {
    s.nfd().filter(|c| !is_nonspacing_mark(*c)).nfc().collect()
}

/// General category Mn. Spacing (Mc) and enclosing (Me) marks are kept.
pub fn is_nonspacing_mark(c: char) -> bool {
    c.general_category() == GeneralCategory::NonspacingMark
}
