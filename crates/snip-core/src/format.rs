//! Conversion between the stored form of a code and its display form.
//!
//! The display form splits a code into groups of [`GROUP_SIZE`] characters
//! joined by [`SEPARATOR`], e.g. `abcdefgh` becomes `abcd-efgh`.

/// Character inserted between display groups.
pub const SEPARATOR: char = '-';

/// Number of characters per display group.
pub const GROUP_SIZE: usize = 4;

/// Inserts a separator before every character index `i` where `i > 0` and
/// `i % GROUP_SIZE == 0`.
///
/// Grouping counts characters, not bytes. The input is expected to be free of
/// separators; use [`reformat`] for text that may already be grouped.
pub fn format(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / GROUP_SIZE);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            out.push(SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Strips every separator character.
pub fn unformat(display: &str) -> String {
    display.chars().filter(|&ch| ch != SEPARATOR).collect()
}

/// Formats text that may or may not already be grouped.
pub fn reformat(text: &str) -> String {
    format(&unformat(text))
}
