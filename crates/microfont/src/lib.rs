//! microfont - Bitmap Font Compiler
//!
//! Turns a fixed-grid bitmap font sheet and a corpus of phrases into:
//! - A glyph atlas holding only the glyphs the phrases use, cropped to one
//!   common bounding box and nibble-packed (2 pixels per byte)
//! - A phrase stream with one byte per character: `[width_delta:3][glyph_code:5]`
//! - A u16 offset table into that stream
//!
//! The output targets renderers with no text shaping at all: a glyph index
//! and an advance are all they get.

pub mod config;
pub mod glyph_table;
pub mod bitmap;
pub mod sheet;
pub mod resolver;
pub mod crop;
pub mod atlas;
pub mod widths;
pub mod codec;
pub mod emit;
pub mod preview;
pub mod pipeline;

pub use config::{BuildConfig, GridGeometry};
pub use glyph_table::GlyphTable;
pub use bitmap::GlyphBitmap;
pub use sheet::{FontSheet, GlyphExtractor, KeyColor};
pub use resolver::{RequiredChars, resolve};
pub use crop::{CropRect, EdgeInsets, common_bounds, crop};
pub use atlas::Atlas;
pub use widths::WidthTable;
pub use codec::{PackedByte, PhraseCodec, PhraseStream};
pub use pipeline::{BuildOutput, BuildWarning, Manifest, build, split_phrases};

/// Glyph codes are 5 bits wide
pub const CODE_BITS: u32 = 5;
/// Width deltas are 3 bits wide
pub const DELTA_BITS: u32 = 3;
/// Largest encodable glyph code
pub const MAX_CODE: u8 = (1 << CODE_BITS) - 1;
/// Largest encodable width delta
pub const MAX_DELTA: u8 = (1 << DELTA_BITS) - 1;
/// Code 0 is reserved for whitespace, so at most this many glyphs fit
pub const MAX_GLYPHS: usize = MAX_CODE as usize;

/// Font compilation errors
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Character {0:?} has no entry in the glyph table")]
    GlyphNotFound(char),

    #[error("Grid cell {index} lies outside the {sheet_width}x{sheet_height} sheet")]
    GlyphOutOfSheet {
        index: usize,
        sheet_width: u32,
        sheet_height: u32,
    },

    #[error("Phrase {phrase}: character {ch:?} is not among the required glyphs")]
    UnencodableChar { phrase: usize, ch: char },

    #[error("Phrase {phrase}: {cause}")]
    MissingGlyph { phrase: usize, cause: BuildWarning },

    #[error("Glyph code {0} does not fit in 5 bits")]
    CodeOverflow(u32),

    #[error("Width delta {0} does not fit in 3 bits")]
    DeltaOverflow(u32),

    #[error("Advance {advance} of {subject} is outside [{min_width}, {min_width} + 7]")]
    WidthBudgetExceeded {
        subject: String,
        advance: u32,
        min_width: u32,
    },

    #[error("Cropped glyph width {0} is odd; nibble packing needs pixel pairs")]
    OddCropWidth(u32),

    #[error("No glyphs are required by the phrase corpus")]
    EmptyGlyphSet,

    #[error("Every required glyph is blank; nothing to crop")]
    EmptyCrop,

    #[error("{0} glyphs required, at most 31 fit in a 5-bit code")]
    TooManyGlyphs(usize),

    #[error("Phrase stream length {0} does not fit a u16 offset")]
    OffsetOverflow(usize),

    #[error("Invalid grid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Glyph bitmap is {found:?}, expected {expected:?}")]
    BitmapSizeMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Malformed atlas data: {0}")]
    MalformedAtlas(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FontError>;
