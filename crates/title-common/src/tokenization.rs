use unicode_segmentation::UnicodeSegmentation;

/// Classification of a segment produced by [`segment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanKind {
    /// Letters, digits, ideographs or kana.
    WordLike,
    /// Whitespace, punctuation, symbols.
    Other,
}

/// A slice of the input between two UAX #29 word boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    pub text: &'a str,
    pub kind: SpanKind,
}

/// Split text at Unicode word boundaries, left to right.
///
/// Every byte of the input ends up in exactly one span, so concatenating the
/// span texts gives back the original string.
pub fn segment(text: &str) -> impl Iterator<Item = TokenSpan<'_>> {
    text.split_word_bounds().map(|s| TokenSpan {
        text: s,
        kind: classify(s),
    })
}

/// Only the word-like spans of `text`.
pub fn word_spans(text: &str) -> impl Iterator<Item = &str> {
    segment(text)
        .filter(|span| span.kind == SpanKind::WordLike)
        .map(|span| span.text)
}

/// A segment is word-like if it carries at least one alphabetic or numeric char.
pub fn classify(segment: &str) -> SpanKind {
    if segment.chars().any(char::is_alphanumeric) {
        SpanKind::WordLike
    } else {
        SpanKind::Other
    }
}
