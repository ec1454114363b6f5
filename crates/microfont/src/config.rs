//! Build configuration

use serde::{Deserialize, Serialize};

use crate::{FontError, Result};

/// Cell layout of a font sheet
///
/// Each cell is `cell_width x cell_height` pixels. The first `border_w`
/// columns and `border_h` rows of every cell are a separator and never
/// belong to the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub border_w: u32,
    pub border_h: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridGeometry {
    /// Create a validated geometry
    pub fn new(border_w: u32, border_h: u32, cell_width: u32, cell_height: u32) -> Result<Self> {
        let geometry = Self { border_w, border_h, cell_width, cell_height };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check `cell > border` on both axes
    pub fn validate(&self) -> Result<()> {
        if self.cell_width <= self.border_w {
            return Err(FontError::InvalidGeometry(format!(
                "cell width {} must exceed border width {}",
                self.cell_width, self.border_w
            )));
        }
        if self.cell_height <= self.border_h {
            return Err(FontError::InvalidGeometry(format!(
                "cell height {} must exceed border height {}",
                self.cell_height, self.border_h
            )));
        }
        Ok(())
    }

    /// Size of the glyph area inside one cell
    pub fn glyph_size(&self) -> (u32, u32) {
        (self.cell_width - self.border_w, self.cell_height - self.border_h)
    }
}

/// Everything the pipeline needs besides the two inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub geometry: GridGeometry,
    /// Byte alignment of each glyph block in the packed atlas
    pub alignment: usize,
    /// Blank columns added after each glyph's ink
    pub letter_spacing: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self { border_w: 0, border_h: 0, cell_width: 8, cell_height: 8 }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            alignment: 8,
            letter_spacing: 1,
        }
    }
}

impl BuildConfig {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry, ..Self::default() }
    }

    /// Override the glyph block alignment
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        if self.alignment == 0 {
            return Err(FontError::InvalidGeometry("alignment must be at least 1".into()));
        }
        Ok(())
    }
}
