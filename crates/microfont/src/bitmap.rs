//! Binarized glyph bitmaps

use crate::crop::CropRect;

/// One glyph as ink / no-ink pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl GlyphBitmap {
    /// Blank bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; (width * height) as usize],
        }
    }

    /// Build by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut ink = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                ink.push(f(x, y));
            }
        }
        Self { width, height, ink }
    }

    /// Parse rows of `#` (ink) and `.` (blank); handy for fixtures
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count() as u32);
        Self::from_fn(width, height, |x, y| {
            rows[y as usize].chars().nth(x as usize) == Some('#')
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Ink at (x, y); out of range reads as blank
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.ink[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x < self.width && y < self.height {
            self.ink[(y * self.width + x) as usize] = ink;
        }
    }

    /// Per-row occupancy: `true` where the row holds any ink
    pub fn row_mask(&self) -> Vec<bool> {
        (0..self.height)
            .map(|y| {
                let start = (y * self.width) as usize;
                self.ink[start..start + self.width as usize].iter().any(|&p| p)
            })
            .collect()
    }

    /// Per-column occupancy: `true` where the column holds any ink
    pub fn column_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.width as usize];
        for row in self.ink.chunks(self.width.max(1) as usize) {
            for (x, &p) in row.iter().enumerate() {
                mask[x] |= p;
            }
        }
        mask
    }

    /// Rightmost ink column + 1, or 0 for a blank glyph
    pub fn ink_width(&self) -> u32 {
        self.column_mask()
            .iter()
            .rposition(|&c| c)
            .map_or(0, |x| x as u32 + 1)
    }

    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&p| p).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.ink.iter().any(|&p| p)
    }

    /// Copy out `rect`; parts outside the bitmap read as blank
    pub fn crop(&self, rect: &CropRect) -> GlyphBitmap {
        GlyphBitmap::from_fn(rect.width, rect.height, |x, y| {
            self.get(rect.left + x, rect.top + y)
        })
    }

    /// Render back to `#`/`.` rows
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| if self.get(x, y) { '#' } else { '.' }).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let bitmap = GlyphBitmap::from_rows(&["#..", ".#."]);
        assert_eq!(bitmap.size(), (3, 2));
        assert!(bitmap.get(0, 0));
        assert!(bitmap.get(1, 1));
        assert!(!bitmap.get(2, 1));
        assert!(!bitmap.get(7, 7));
        assert_eq!(bitmap.to_rows(), vec!["#..", ".#."]);
    }

    #[test]
    fn test_masks() {
        let bitmap = GlyphBitmap::from_rows(&["....", ".#..", "...#"]);
        assert_eq!(bitmap.row_mask(), vec![false, true, true]);
        assert_eq!(bitmap.column_mask(), vec![false, true, false, true]);
    }

    #[test]
    fn test_ink_width() {
        assert_eq!(GlyphBitmap::from_rows(&["#...", "..#."]).ink_width(), 3);
        assert_eq!(GlyphBitmap::from_rows(&["....", "...."]).ink_width(), 0);
        assert_eq!(GlyphBitmap::from_rows(&["...#"]).ink_width(), 4);
    }

    #[test]
    fn test_crop() {
        let bitmap = GlyphBitmap::from_rows(&["....", ".##.", ".#..", "...."]);
        let cropped = bitmap.crop(&CropRect::new(1, 1, 2, 2));
        assert_eq!(cropped.to_rows(), vec!["##", "#."]);
        assert_eq!(cropped.ink_count(), 3);
    }
}
