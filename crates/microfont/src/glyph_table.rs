//! Character to grid-cell mapping

use crate::{FontError, Result};

/// Ordered characters of a font sheet
///
/// Entry `i` is drawn in grid cell `i` (row-major). Whitespace entries
/// still occupy a cell, so they keep their position in the sequence, but
/// they cannot be looked up: whitespace is never drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    chars: Vec<char>,
}

impl GlyphTable {
    /// Build from characters already in grid order
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self { chars: chars.into_iter().collect() }
    }

    /// Parse a character listing, dropping line breaks
    pub fn parse(text: &str) -> Self {
        Self::new(text.chars().filter(|&c| c != '\n' && c != '\r'))
    }

    /// Grid index of the first cell holding `ch`
    pub fn index_of(&self, ch: char) -> Option<usize> {
        if ch.is_whitespace() {
            return None;
        }
        self.chars.iter().position(|&c| c == ch)
    }

    /// Like [`index_of`](Self::index_of) but failing with `GlyphNotFound`
    pub fn lookup(&self, ch: char) -> Result<usize> {
        self.index_of(ch).ok_or(FontError::GlyphNotFound(ch))
    }

    /// Whether `ch` can be drawn from this table
    pub fn contains(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// All entries in grid order, whitespace included
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_line_breaks() {
        let table = GlyphTable::parse("AB\r\nCD\n");
        assert_eq!(table.chars(), &['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_whitespace_keeps_its_cell() {
        let table = GlyphTable::parse("A B");
        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of('B'), Some(2));
        assert_eq!(table.index_of(' '), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let table = GlyphTable::parse("ABA");
        assert_eq!(table.index_of('A'), Some(0));
    }

    #[test]
    fn test_lookup_missing() {
        let table = GlyphTable::parse("AB");
        assert!(matches!(table.lookup('Z'), Err(FontError::GlyphNotFound('Z'))));
        assert!(!table.contains('Z'));
    }
}
