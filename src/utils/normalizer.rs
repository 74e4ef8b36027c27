use rayon::prelude::*;
use unidecode::unidecode;

/// Normalize a text
/// Transliterates to ASCII, lowercases, deletes punctuation and symbols,
/// collapses whitespace runs into one space and trims both ends.
///
/// # Arguments
/// * `text` - text to normalize
///
/// # Returns
/// * `String` - normalized text
///
/// # Examples
/// ```
/// use sparse_vectorizer::normalize;
/// assert_eq!(normalize("Hello, world!"), "hello world");
/// ```
pub fn normalize(text: &str) -> String {
    let ascii = unidecode(text);
    let mut normalized = String::with_capacity(ascii.len());
    let mut pending_space = false;
    for c in ascii.chars() {
        if c.is_whitespace() {
            pending_space = !normalized.is_empty();
            continue;
        }
        // punctuation is deleted, not turned into a separator
        if c.is_ascii_punctuation() || c.is_control() || !c.is_ascii() {
            continue;
        }
        if pending_space {
            normalized.push(' ');
            pending_space = false;
        }
        normalized.push(c.to_ascii_lowercase());
    }
    normalized
}

/// Normalize many texts in parallel
/// Output order and length match the input.
pub fn normalize_many<T>(texts: &[T]) -> Vec<String>
where
    T: AsRef<str> + Sync,
{
    texts.par_iter().map(|text| normalize(text.as_ref())).collect()
}

/// Normalize a single character for position-preserving scans
/// Returns the ASCII lowercase characters that `c` turns into, without
/// punctuation or symbols. Whitespace is kept as-is so callers can detect
/// boundaries.
#[inline]
pub(crate) fn normalize_char(c: char) -> impl Iterator<Item = char> {
    unidecode::unidecode_char(c)
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| c.to_ascii_lowercase())
}
