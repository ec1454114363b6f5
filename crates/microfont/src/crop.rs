//! Common crop bounds
//!
//! Every glyph is cropped by the same rectangle so that all glyphs keep
//! their pixel origin. The packed phrase format stores an advance but no
//! x offset, so individually cropped glyphs would lose their alignment.

use rayon::prelude::*;
use serde::Serialize;

use crate::bitmap::GlyphBitmap;
use crate::{FontError, Result};

/// Rectangle applied to every glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    /// Rectangle covering a whole `width x height` bitmap
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

/// Blank rows/columns that can be trimmed from each edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeInsets {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl EdgeInsets {
    /// Leading blank rows/columns of one bitmap, scanned from each edge
    ///
    /// A blank bitmap reports its full height/width on every edge.
    pub fn of(bitmap: &GlyphBitmap) -> Self {
        let rows = bitmap.row_mask();
        let columns = bitmap.column_mask();
        Self {
            top: leading_blank(rows.iter()),
            bottom: leading_blank(rows.iter().rev()),
            left: leading_blank(columns.iter()),
            right: leading_blank(columns.iter().rev()),
        }
    }

    /// Edge-wise minimum: only what both sides can spare
    pub fn min(self, other: Self) -> Self {
        Self {
            top: self.top.min(other.top),
            bottom: self.bottom.min(other.bottom),
            left: self.left.min(other.left),
            right: self.right.min(other.right),
        }
    }

    /// Rectangle left over inside a `width x height` bitmap
    pub fn rect(&self, width: u32, height: u32) -> CropRect {
        let inner_width = width.saturating_sub(self.left + self.right);
        let inner_height = height.saturating_sub(self.top + self.bottom);
        if inner_width == 0 || inner_height == 0 {
            return CropRect::default();
        }
        CropRect::new(self.left, self.top, inner_width, inner_height)
    }
}

fn leading_blank<'a>(mask: impl Iterator<Item = &'a bool>) -> u32 {
    mask.take_while(|&&ink| !ink).count() as u32
}

/// Largest rectangle that only removes rows/columns blank in every bitmap
///
/// An empty slice gives a zero rectangle; a set without any ink gives a
/// zero-size rectangle. All bitmaps must share one size.
pub fn common_bounds(bitmaps: &[GlyphBitmap]) -> Result<CropRect> {
    let Some(first) = bitmaps.first() else {
        return Ok(CropRect::default());
    };
    let (width, height) = first.size();
    if let Some(odd) = bitmaps.iter().find(|b| b.size() != (width, height)) {
        return Err(FontError::BitmapSizeMismatch {
            expected: (width, height),
            found: odd.size(),
        });
    }

    let insets = bitmaps
        .par_iter()
        .map(EdgeInsets::of)
        .reduce_with(EdgeInsets::min)
        .unwrap_or(EdgeInsets { top: 0, bottom: 0, left: 0, right: 0 });
    Ok(insets.rect(width, height))
}

/// Crop every bitmap to their [`common_bounds`]
pub fn crop(bitmaps: &[GlyphBitmap]) -> Result<(CropRect, Vec<GlyphBitmap>)> {
    let rect = common_bounds(bitmaps)?;
    let cropped = bitmaps.iter().map(|b| b.crop(&rect)).collect();
    Ok((rect, cropped))
}
