//! Utility functions for term processing.

/// Normalize a query term for lookup: lowercase.
///
/// Stored words were lower-cased by the index builder, so this is all the
/// normalization a term needs. No stemming, no diacritic folding.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// True if `term` equals the first `term.len()` bytes of `word`.
///
/// Byte-wise and case-sensitive. Callers lower-case the term first.
#[inline]
pub fn is_prefix_of(term: &[u8], word: &[u8]) -> bool {
    word.get(..term.len()) == Some(term)
}
