//! Font sheet and glyph extraction
//!
//! A font sheet is an RGBA image cut into a row-major grid of equal cells.
//! Glyphs are binarized against a key color: anything that differs from
//! the key is ink.

use image::{Rgba, RgbaImage};

use crate::bitmap::GlyphBitmap;
use crate::config::GridGeometry;
use crate::glyph_table::GlyphTable;
use crate::{FontError, Result};

/// Font sheet image plus its cell layout
#[derive(Debug, Clone)]
pub struct FontSheet {
    image: RgbaImage,
    geometry: GridGeometry,
}

impl FontSheet {
    /// Wrap an already decoded image
    pub fn new(image: RgbaImage, geometry: GridGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self { image, geometry })
    }

    /// Decode an encoded image (PNG)
    pub fn decode(data: &[u8], geometry: GridGeometry) -> Result<Self> {
        let image = image::load_from_memory(data)?.to_rgba8();
        tracing::debug!("Decoded font sheet {}x{}", image.width(), image.height());
        Self::new(image, geometry)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of whole cells per row
    pub fn columns(&self) -> u32 {
        self.image.width() / self.geometry.cell_width
    }

    /// Top-left corner of the glyph area of cell `index`
    pub fn cell_origin(&self, index: usize) -> Option<(u32, u32)> {
        let cols = self.columns() as usize;
        if cols == 0 {
            return None;
        }
        let col = (index % cols) as u32;
        let row = u32::try_from(index / cols).ok()?;
        let x = col * self.geometry.cell_width + self.geometry.border_w;
        let y = row.checked_mul(self.geometry.cell_height)? + self.geometry.border_h;
        let (w, h) = self.geometry.glyph_size();
        if x + w > self.image.width() || y.checked_add(h)? > self.image.height() {
            return None;
        }
        Some((x, y))
    }
}

/// Color that marks "no ink" on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColor(pub Rgba<u8>);

impl KeyColor {
    /// Sample the first interior pixel of cell 0, i.e. `(border_w, border_h)`
    pub fn sample(sheet: &FontSheet) -> Result<Self> {
        let geometry = sheet.geometry();
        if geometry.border_w >= sheet.width() || geometry.border_h >= sheet.height() {
            return Err(FontError::InvalidGeometry(format!(
                "sheet {}x{} is too small to hold a single cell",
                sheet.width(),
                sheet.height()
            )));
        }
        Ok(Self(*sheet.image().get_pixel(geometry.border_w, geometry.border_h)))
    }

    pub fn is_ink(&self, pixel: &Rgba<u8>) -> bool {
        *pixel != self.0
    }
}

/// Cuts binarized glyphs out of a sheet
pub struct GlyphExtractor<'a> {
    sheet: &'a FontSheet,
    key: KeyColor,
}

impl<'a> GlyphExtractor<'a> {
    /// Extractor using the key color sampled from the sheet
    pub fn new(sheet: &'a FontSheet) -> Result<Self> {
        let key = KeyColor::sample(sheet)?;
        Ok(Self::with_key(sheet, key))
    }

    /// Extractor with an explicit key color
    pub fn with_key(sheet: &'a FontSheet, key: KeyColor) -> Self {
        Self { sheet, key }
    }

    pub fn key(&self) -> KeyColor {
        self.key
    }

    /// Extract the glyph in grid cell `index`, at full glyph-area size
    pub fn extract(&self, index: usize) -> Result<GlyphBitmap> {
        let (x0, y0) = self.sheet.cell_origin(index).ok_or(FontError::GlyphOutOfSheet {
            index,
            sheet_width: self.sheet.width(),
            sheet_height: self.sheet.height(),
        })?;
        let (w, h) = self.sheet.geometry().glyph_size();
        let image = self.sheet.image();
        Ok(GlyphBitmap::from_fn(w, h, |x, y| {
            self.key.is_ink(image.get_pixel(x0 + x, y0 + y))
        }))
    }

    /// Look up `ch` in `table` and extract its cell
    pub fn extract_char(&self, table: &GlyphTable, ch: char) -> Result<GlyphBitmap> {
        self.extract(table.lookup(ch)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: Rgba<u8> = Rgba([255, 0, 255, 255]);
    const INK: Rgba<u8> = Rgba([10, 10, 10, 255]);
    const BORDER: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// 2 columns x 2 rows of 4x4 cells with a 1px border; cell `i` has ink at (2, i % 3)
    fn sheet() -> FontSheet {
        let mut image = RgbaImage::from_pixel(8, 8, KEY);
        for (x, y, px) in image.enumerate_pixels_mut() {
            if x % 4 == 0 || y % 4 == 0 {
                *px = BORDER;
            }
        }
        for i in 0..4u32 {
            let (col, row) = (i % 2, i / 2);
            image.put_pixel(col * 4 + 3, row * 4 + 1 + i % 3, INK);
        }
        FontSheet::new(image, GridGeometry::new(1, 1, 4, 4).unwrap()).unwrap()
    }

    #[test]
    fn test_key_color_sampled_inside_border() {
        let sheet = sheet();
        assert_eq!(KeyColor::sample(&sheet).unwrap(), KeyColor(KEY));
    }

    #[test]
    fn test_extract_skips_border() {
        let sheet = sheet();
        let extractor = GlyphExtractor::new(&sheet).unwrap();
        let glyph = extractor.extract(0).unwrap();
        assert_eq!(glyph.size(), (3, 3));
        assert_eq!(glyph.to_rows(), vec!["..#", "...", "..."]);
        let glyph = extractor.extract(3).unwrap();
        assert_eq!(glyph.to_rows(), vec!["..#", "...", "..."]);
    }

    #[test]
    fn test_extract_row_major_order() {
        let sheet = sheet();
        let extractor = GlyphExtractor::new(&sheet).unwrap();
        assert_eq!(extractor.extract(1).unwrap().to_rows(), vec!["...", "..#", "..."]);
        assert_eq!(extractor.extract(2).unwrap().to_rows(), vec!["...", "...", "..#"]);
    }

    #[test]
    fn test_extract_out_of_sheet() {
        let sheet = sheet();
        let extractor = GlyphExtractor::new(&sheet).unwrap();
        assert!(matches!(
            extractor.extract(4),
            Err(FontError::GlyphOutOfSheet { index: 4, .. })
        ));
    }

    #[test]
    fn test_extract_char() {
        let sheet = sheet();
        let extractor = GlyphExtractor::new(&sheet).unwrap();
        let table = GlyphTable::parse("ab c");
        assert_eq!(extractor.extract_char(&table, 'c').unwrap().ink_count(), 1);
        assert!(matches!(
            extractor.extract_char(&table, 'z'),
            Err(FontError::GlyphNotFound('z'))
        ));
    }

    #[test]
    fn test_any_other_color_is_ink() {
        let mut image = RgbaImage::from_pixel(2, 1, KEY);
        image.put_pixel(1, 0, Rgba([255, 0, 255, 254]));
        let sheet = FontSheet::new(image, GridGeometry::new(0, 0, 2, 1).unwrap()).unwrap();
        let glyph = GlyphExtractor::new(&sheet).unwrap().extract(0).unwrap();
        assert_eq!(glyph.to_rows(), vec![".#"]);
    }
}
