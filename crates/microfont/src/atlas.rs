//! Glyph atlas
//!
//! Pixel form: cropped glyphs stacked top to bottom in glyph code order.
//! Wire form: 4 bits per pixel, two horizontally adjacent pixels per byte
//! (`high = pixel[x]`, `low = pixel[x + 1]`), each glyph block zero-padded
//! to the alignment boundary.

use image::{Rgba, RgbaImage};

use crate::bitmap::GlyphBitmap;
use crate::crop::CropRect;
use crate::{FontError, Result};

/// Default glyph block alignment in bytes
pub const GLYPH_ALIGNMENT: usize = 8;

const INK_NIBBLE: u8 = 0xF;

/// Vertical strip of equally sized glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    glyph_width: u32,
    glyph_height: u32,
    glyph_count: usize,
    pixels: GlyphBitmap,
}

impl Atlas {
    /// Stack `glyphs` (already cropped to `rect`) into one strip
    pub fn pack(glyphs: &[GlyphBitmap], rect: &CropRect) -> Result<Self> {
        let expected = (rect.width, rect.height);
        if let Some(bad) = glyphs.iter().find(|g| g.size() != expected) {
            return Err(FontError::BitmapSizeMismatch { expected, found: bad.size() });
        }
        let height = rect.height * glyphs.len() as u32;
        let pixels = GlyphBitmap::from_fn(rect.width, height, |x, y| {
            let glyph = &glyphs[(y / rect.height) as usize];
            glyph.get(x, y % rect.height)
        });
        Ok(Self {
            glyph_width: rect.width,
            glyph_height: rect.height,
            glyph_count: glyphs.len(),
            pixels,
        })
    }

    pub fn glyph_width(&self) -> u32 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u32 {
        self.glyph_height
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Whole strip
    pub fn pixels(&self) -> &GlyphBitmap {
        &self.pixels
    }

    /// Glyph at atlas slot `index` (glyph code `index + 1`)
    pub fn glyph(&self, index: usize) -> Option<GlyphBitmap> {
        if index >= self.glyph_count {
            return None;
        }
        let rect = CropRect::new(0, index as u32 * self.glyph_height, self.glyph_width, self.glyph_height);
        Some(self.pixels.crop(&rect))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = GlyphBitmap> + '_ {
        (0..self.glyph_count).filter_map(|i| self.glyph(i))
    }

    /// Bytes of pixel data per glyph, before padding
    pub fn glyph_bytes(&self) -> usize {
        (self.glyph_width as usize).div_ceil(2) * self.glyph_height as usize
    }

    /// Bytes per glyph block including padding (`CHAR_SIZE`)
    pub fn char_size(&self, alignment: usize) -> usize {
        self.glyph_bytes().next_multiple_of(alignment.max(1))
    }

    /// Nibble-pack every glyph; fails on an odd glyph width
    pub fn serialize(&self, alignment: usize) -> Result<Vec<u8>> {
        if self.glyph_width % 2 != 0 {
            return Err(FontError::OddCropWidth(self.glyph_width));
        }
        let char_size = self.char_size(alignment);
        let mut out = Vec::with_capacity(char_size * self.glyph_count);
        for index in 0..self.glyph_count {
            let block_start = out.len();
            let top = index as u32 * self.glyph_height;
            for y in top..top + self.glyph_height {
                for x in (0..self.glyph_width).step_by(2) {
                    let high = nibble(self.pixels.get(x, y));
                    let low = nibble(self.pixels.get(x + 1, y));
                    out.push((high << 4) | low);
                }
            }
            out.resize(block_start + char_size, 0);
        }
        Ok(out)
    }

    /// Rebuild an atlas from its wire form; padding is ignored
    pub fn decode(
        data: &[u8],
        glyph_width: u32,
        glyph_height: u32,
        glyph_count: usize,
        char_size: usize,
    ) -> Result<Self> {
        if glyph_width % 2 != 0 {
            return Err(FontError::OddCropWidth(glyph_width));
        }
        let row_bytes = (glyph_width / 2) as usize;
        if row_bytes * glyph_height as usize > char_size {
            return Err(FontError::MalformedAtlas(format!(
                "{glyph_width}x{glyph_height} glyphs do not fit {char_size}-byte blocks"
            )));
        }
        if data.len() < char_size * glyph_count {
            return Err(FontError::MalformedAtlas(format!(
                "{} bytes is short of {glyph_count} blocks of {char_size}",
                data.len()
            )));
        }

        let pixels = GlyphBitmap::from_fn(glyph_width, glyph_height * glyph_count as u32, |x, y| {
            let index = (y / glyph_height) as usize;
            let row = (y % glyph_height) as usize;
            let byte = data[index * char_size + row * row_bytes + (x / 2) as usize];
            let value = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            value != 0
        });
        Ok(Self { glyph_width, glyph_height, glyph_count, pixels })
    }

    /// White-on-transparent RGBA image of the strip
    pub fn to_image(&self) -> RgbaImage {
        let (width, height) = self.pixels.size();
        RgbaImage::from_fn(width, height, |x, y| {
            if self.pixels.get(x, y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }
}

fn nibble(ink: bool) -> u8 {
    if ink { INK_NIBBLE } else { 0 }
}
