//! Required glyph resolution

use std::collections::HashSet;

use crate::glyph_table::GlyphTable;
use crate::{FontError, MAX_GLYPHS, Result};

/// Distinct, drawable characters the corpus needs, in glyph table order
///
/// Position `i` is glyph code `i + 1`; code 0 is whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredChars {
    chars: Vec<char>,
}

impl RequiredChars {
    /// Validate and wrap an ordered character list
    pub fn new(chars: Vec<char>) -> Result<Self> {
        if chars.len() > MAX_GLYPHS {
            return Err(FontError::TooManyGlyphs(chars.len()));
        }
        Ok(Self { chars })
    }

    /// Zero-based position of `ch`
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.chars.iter().position(|&c| c == ch)
    }

    /// Glyph code of `ch` (1-based)
    pub fn code_of(&self, ch: char) -> Option<u8> {
        self.index_of(ch).map(|i| i as u8 + 1)
    }

    /// Same list minus `dropped`, order kept
    pub fn without(&self, dropped: &[char]) -> Self {
        Self {
            chars: self.chars.iter().copied().filter(|c| !dropped.contains(c)).collect(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Collect the glyphs the phrases need
///
/// Walks `table` in grid order and keeps each non-whitespace character
/// once if it occurs anywhere in the corpus. The resulting order depends
/// only on the table, so glyph codes stay stable when phrases are
/// reordered.
pub fn resolve<S: AsRef<str>>(table: &GlyphTable, phrases: &[S]) -> Result<RequiredChars> {
    let used = corpus_chars(phrases);
    let mut chars = Vec::new();
    for &ch in table.chars() {
        if ch.is_whitespace() || chars.contains(&ch) {
            continue;
        }
        if used.contains(&ch) {
            chars.push(ch);
        }
    }
    tracing::debug!("Resolved {} required glyphs", chars.len());
    RequiredChars::new(chars)
}

/// Non-whitespace corpus characters the table cannot draw, in corpus order
pub fn unmapped<S: AsRef<str>>(table: &GlyphTable, phrases: &[S]) -> Vec<char> {
    let mut missing = Vec::new();
    for ch in phrases.iter().flat_map(|p| p.as_ref().chars()) {
        if !ch.is_whitespace() && !table.contains(ch) && !missing.contains(&ch) {
            missing.push(ch);
        }
    }
    missing
}

fn corpus_chars<S: AsRef<str>>(phrases: &[S]) -> HashSet<char> {
    phrases.iter().flat_map(|p| p.as_ref().chars()).collect()
}
