//! Build pipeline
//!
//! Resolve → extract → crop → pack → measure → encode. Every stage takes
//! the complete result of the previous one, since the crop rectangle and
//! the width baseline depend on the whole glyph set. Nothing is returned
//! unless every stage succeeds.
//!
//! Per-glyph problems (a character missing from the table, a cell outside
//! the sheet) are logged and the glyph is dropped. A phrase that still uses
//! such a glyph fails with `MissingGlyph`, which names the original problem.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::codec::{PhraseCodec, PhraseStream};
use crate::config::BuildConfig;
use crate::crop::{self, CropRect};
use crate::emit::{self, AtlasLayout};
use crate::glyph_table::GlyphTable;
use crate::resolver::{self, RequiredChars};
use crate::sheet::{FontSheet, GlyphExtractor};
use crate::widths::WidthTable;
use crate::{FontError, Result};

/// Per-glyph condition collected while building
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildWarning {
    #[error("Skipped glyph {ch:?}: {reason}")]
    GlyphSkipped { ch: char, reason: String },

    #[error("Character {ch:?} appears in the phrases but not in the glyph table")]
    UnmappedChar { ch: char },
}

impl BuildWarning {
    /// Character the warning is about
    pub fn ch(&self) -> char {
        match self {
            Self::GlyphSkipped { ch, .. } | Self::UnmappedChar { ch } => *ch,
        }
    }
}

/// Everything a build produces
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub required: RequiredChars,
    pub crop: CropRect,
    pub atlas: Atlas,
    /// Nibble-packed atlas, one padded block per glyph
    pub atlas_bytes: Vec<u8>,
    pub widths: WidthTable,
    pub stream: PhraseStream,
    pub alignment: usize,
}

/// Description of the artifacts, written next to them as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub char_width: u32,
    pub char_height: u32,
    pub char_size: usize,
    pub char_spacing_offset: u32,
    pub space_width: u32,
    pub alignment: usize,
    pub crop: CropRect,
    pub glyphs: String,
    pub widths: Vec<u32>,
    pub phrase_count: usize,
    pub stream_len: usize,
}

impl BuildOutput {
    /// Bytes per glyph block (`CHAR_SIZE`)
    pub fn char_size(&self) -> usize {
        self.atlas.char_size(self.alignment)
    }

    pub fn layout(&self) -> AtlasLayout {
        AtlasLayout {
            char_width: self.atlas.glyph_width(),
            char_height: self.atlas.glyph_height(),
            char_size: self.char_size(),
            spacing_offset: self.widths.min_width(),
            alignment: self.alignment,
        }
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            char_width: self.atlas.glyph_width(),
            char_height: self.atlas.glyph_height(),
            char_size: self.char_size(),
            char_spacing_offset: self.widths.min_width(),
            space_width: self.widths.space_width(),
            alignment: self.alignment,
            crop: self.crop,
            glyphs: self.required.iter().collect(),
            widths: self.widths.widths().to_vec(),
            phrase_count: self.stream.phrase_count(),
            stream_len: self.stream.len(),
        }
    }

    pub fn manifest_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.manifest())
    }

    /// C source for the atlas
    pub fn atlas_source(&self, prefix: &str) -> String {
        emit::atlas_source(prefix, &self.layout(), &self.atlas_bytes)
    }

    /// C source for the phrase stream and offsets
    pub fn phrases_source(&self, prefix: &str) -> String {
        emit::phrases_source(prefix, &self.stream)
    }
}

/// Split a phrase corpus into lines; a trailing newline adds no phrase
pub fn split_phrases(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Compile `phrases` against the glyphs of `sheet`
///
/// The sheet carries its own grid geometry; `config` supplies alignment and
/// letter spacing.
pub fn build<S: AsRef<str>>(
    sheet: &FontSheet,
    table: &GlyphTable,
    phrases: &[S],
    config: &BuildConfig,
) -> Result<BuildOutput> {
    config.validate()?;
    let mut warnings = Vec::new();

    for ch in resolver::unmapped(table, phrases) {
        tracing::warn!("Character {:?} is not in the glyph table", ch);
        warnings.push(BuildWarning::UnmappedChar { ch });
    }

    let required = resolver::resolve(table, phrases)?;

    let extractor = GlyphExtractor::new(sheet)?;
    tracing::debug!("Key color {:?}", extractor.key().0);
    let mut bitmaps = Vec::with_capacity(required.len());
    let mut skipped = Vec::new();
    for ch in required.iter() {
        match extractor.extract_char(table, ch) {
            Ok(bitmap) => bitmaps.push(bitmap),
            Err(err @ (FontError::GlyphNotFound(_) | FontError::GlyphOutOfSheet { .. })) => {
                tracing::warn!("Skipping glyph {:?}: {}", ch, err);
                warnings.push(BuildWarning::GlyphSkipped { ch, reason: err.to_string() });
                skipped.push(ch);
            }
            Err(err) => return Err(err),
        }
    }
    let required = required.without(&skipped);
    if required.is_empty() {
        return Err(FontError::EmptyGlyphSet);
    }

    let (rect, cropped) = crop::crop(&bitmaps)?;
    if rect.is_empty() {
        return Err(FontError::EmptyCrop);
    }
    tracing::debug!(
        "Common crop: {}x{} at ({}, {})",
        rect.width,
        rect.height,
        rect.left,
        rect.top
    );

    let atlas = Atlas::pack(&cropped, &rect)?;
    let atlas_bytes = atlas.serialize(config.alignment)?;
    let widths = WidthTable::from_atlas(&atlas, config.letter_spacing)?;
    let stream = PhraseCodec::new(&required, &widths)
        .encode_all(phrases)
        .map_err(|err| with_cause(err, &warnings))?;

    tracing::info!(
        "Compiled {} glyphs at {}x{} ({} atlas bytes), {} phrases ({} bytes)",
        required.len(),
        rect.width,
        rect.height,
        atlas_bytes.len(),
        stream.phrase_count(),
        stream.len()
    );

    Ok(BuildOutput {
        required,
        crop: rect,
        atlas,
        atlas_bytes,
        widths,
        stream,
        alignment: config.alignment,
    })
}

/// Replace an unencodable character error by the warning that dropped its glyph
fn with_cause(err: FontError, warnings: &[BuildWarning]) -> FontError {
    match err {
        FontError::UnencodableChar { phrase, ch } => {
            match warnings.iter().find(|w| w.ch() == ch) {
                Some(cause) => FontError::MissingGlyph { phrase, cause: cause.clone() },
                None => FontError::UnencodableChar { phrase, ch },
            }
        }
        err => err,
    }
}
