//! Advance widths
//!
//! A glyph's ink width is its rightmost lit column + 1 (0 when blank). The
//! advance written to the phrase stream is ink width + letter spacing;
//! whitespace advances by the full cropped cell width. Advances are stored
//! as a 3-bit delta over `min_width`, so all of them must fall within
//! `min_width..=min_width + 7`. The space advance is only checked when a
//! phrase actually encodes whitespace.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::bitmap::GlyphBitmap;
use crate::crop::CropRect;
use crate::{FontError, MAX_DELTA, Result};

/// Per-glyph widths plus the shared baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidthTable {
    /// Ink width of glyph code `i + 1`
    widths: Vec<u32>,
    space_width: u32,
    min_width: u32,
    letter_spacing: u32,
}

impl WidthTable {
    /// Measure cropped glyphs; `rect.width` becomes the space advance
    pub fn compute(glyphs: &[GlyphBitmap], rect: &CropRect, letter_spacing: u32) -> Result<Self> {
        let widths: Vec<u32> = glyphs.iter().map(GlyphBitmap::ink_width).collect();
        Self::from_widths(widths, rect.width, letter_spacing)
    }

    /// Measure glyphs straight from an atlas
    pub fn from_atlas(atlas: &Atlas, letter_spacing: u32) -> Result<Self> {
        let widths = atlas.glyphs().map(|g| g.ink_width()).collect();
        Self::from_widths(widths, atlas.glyph_width(), letter_spacing)
    }

    /// Build from known ink widths and validate the delta budget
    pub fn from_widths(widths: Vec<u32>, space_width: u32, letter_spacing: u32) -> Result<Self> {
        let narrowest = widths.iter().copied().chain([space_width]).min().unwrap_or(space_width);
        let table = Self {
            widths,
            space_width,
            min_width: narrowest + letter_spacing,
            letter_spacing,
        };
        table.validate()?;
        tracing::debug!(
            "Widths: min {} space {} glyphs {:?}",
            table.min_width,
            table.space_width,
            table.widths
        );
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        for code in 1..=self.widths.len() {
            let advance = self.advance_of(code);
            if self.delta_of(advance).is_none() {
                return Err(FontError::WidthBudgetExceeded {
                    subject: format!("glyph code {code}"),
                    advance,
                    min_width: self.min_width,
                });
            }
        }
        Ok(())
    }

    fn advance_of(&self, code: usize) -> u32 {
        match code {
            0 => self.space_width,
            n => self.widths[n - 1] + self.letter_spacing,
        }
    }

    fn delta_of(&self, advance: u32) -> Option<u8> {
        advance
            .checked_sub(self.min_width)
            .filter(|&d| d <= u32::from(MAX_DELTA))
            .map(|d| d as u8)
    }

    /// Ink width of atlas slot `index`
    pub fn ink_width(&self, index: usize) -> Option<u32> {
        self.widths.get(index).copied()
    }

    /// Advance for a glyph code (0 = whitespace)
    pub fn advance(&self, code: u8) -> Option<u32> {
        let code = code as usize;
        (code <= self.widths.len()).then(|| self.advance_of(code))
    }

    /// 3-bit delta for a glyph code (0 = whitespace)
    pub fn delta(&self, code: u8) -> Option<u8> {
        self.advance(code).and_then(|a| self.delta_of(a))
    }

    /// All ink widths in atlas order
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn space_width(&self) -> u32 {
        self.space_width
    }

    /// Baseline advance, emitted as `CHAR_SPACING_OFFSET`
    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn letter_spacing(&self) -> u32 {
        self.letter_spacing
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
