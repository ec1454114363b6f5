//! Phrase preview
//!
//! Draws a phrase from the compiled artifacts alone, the same way the
//! downstream renderer does: code 0 only advances, any other code blits
//! atlas slot `code - 1` at the pen position, then the pen moves by
//! `delta + min_width`.

use image::{Rgba, RgbaImage};

use crate::atlas::Atlas;
use crate::bitmap::GlyphBitmap;
use crate::codec::{PackedByte, PhraseStream};

/// Render packed bytes into an ink bitmap one glyph tall
pub fn render_bytes(atlas: &Atlas, min_width: u32, bytes: &[u8]) -> GlyphBitmap {
    let packed: Vec<PackedByte> = bytes.iter().copied().map(PackedByte::from_byte).collect();

    let mut pen = 0u32;
    let mut extent = 0u32;
    for p in &packed {
        if !p.is_space() {
            extent = extent.max(pen + atlas.glyph_width());
        }
        pen += p.advance(min_width);
    }
    let width = extent.max(pen);

    let mut canvas = GlyphBitmap::new(width, atlas.glyph_height());
    let mut pen = 0u32;
    for p in packed {
        if let Some(glyph) = p.glyph_index().and_then(|i| atlas.glyph(i)) {
            for y in 0..glyph.height() {
                for x in 0..glyph.width() {
                    if glyph.get(x, y) {
                        canvas.set(pen + x, y, true);
                    }
                }
            }
        }
        pen += p.advance(min_width);
    }
    canvas
}

/// Render phrase `index` of `stream`
pub fn render_phrase(
    atlas: &Atlas,
    min_width: u32,
    stream: &PhraseStream,
    index: usize,
) -> Option<GlyphBitmap> {
    stream.phrase(index).map(|bytes| render_bytes(atlas, min_width, bytes))
}

/// Ink bitmap to an image: `ink` on `background`
pub fn to_image(bitmap: &GlyphBitmap, ink: Rgba<u8>, background: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        if bitmap.get(x, y) { ink } else { background }
    })
}
