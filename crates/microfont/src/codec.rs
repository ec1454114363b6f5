//! Phrase codec
//!
//! Every phrase character becomes one byte: `[width_delta:3][glyph_code:5]`.
//! Code 0 is whitespace, code `n` is atlas slot `n - 1`. The renderer
//! advances by `width_delta + min_width` after drawing.

use crate::resolver::RequiredChars;
use crate::widths::WidthTable;
use crate::{CODE_BITS, FontError, MAX_CODE, MAX_DELTA, Result};

/// One validated phrase byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedByte {
    code: u8,
    delta: u8,
}

impl PackedByte {
    /// Whitespace with zero delta
    pub const SPACE: Self = Self { code: 0, delta: 0 };

    /// Validate both fields against their bit budgets
    pub fn new(code: u32, delta: u32) -> Result<Self> {
        if code > u32::from(MAX_CODE) {
            return Err(FontError::CodeOverflow(code));
        }
        if delta > u32::from(MAX_DELTA) {
            return Err(FontError::DeltaOverflow(delta));
        }
        Ok(Self { code: code as u8, delta: delta as u8 })
    }

    /// Split a stream byte; every byte value is a valid packing
    pub fn from_byte(byte: u8) -> Self {
        Self {
            code: byte & MAX_CODE,
            delta: byte >> CODE_BITS,
        }
    }

    pub fn to_byte(self) -> u8 {
        (self.delta << CODE_BITS) | self.code
    }

    pub fn code(self) -> u8 {
        self.code
    }

    pub fn delta(self) -> u8 {
        self.delta
    }

    pub fn is_space(self) -> bool {
        self.code == 0
    }

    /// Atlas slot drawn by this byte, `None` for whitespace
    pub fn glyph_index(self) -> Option<usize> {
        (self.code > 0).then(|| self.code as usize - 1)
    }

    /// Horizontal advance given the font's baseline
    pub fn advance(self, min_width: u32) -> u32 {
        u32::from(self.delta) + min_width
    }
}

impl From<PackedByte> for u8 {
    fn from(packed: PackedByte) -> u8 {
        packed.to_byte()
    }
}

/// Encodes phrases against one glyph set and width table
pub struct PhraseCodec<'a> {
    required: &'a RequiredChars,
    widths: &'a WidthTable,
}

impl<'a> PhraseCodec<'a> {
    pub fn new(required: &'a RequiredChars, widths: &'a WidthTable) -> Self {
        Self { required, widths }
    }

    /// Pack one character of phrase `phrase`
    pub fn encode_char(&self, phrase: usize, ch: char) -> Result<PackedByte> {
        let code = if ch.is_whitespace() {
            0
        } else {
            self.required
                .code_of(ch)
                .ok_or(FontError::UnencodableChar { phrase, ch })?
        };
        let advance = self
            .widths
            .advance(code)
            .ok_or(FontError::UnencodableChar { phrase, ch })?;
        let delta = self
            .widths
            .delta(code)
            .ok_or_else(|| FontError::WidthBudgetExceeded {
                subject: format!("{ch:?}"),
                advance,
                min_width: self.widths.min_width(),
            })?;
        PackedByte::new(u32::from(code), u32::from(delta))
    }

    /// Encode one phrase; returns its bytes and its length in characters
    pub fn encode(&self, phrase: usize, text: &str) -> Result<(Vec<u8>, usize)> {
        let bytes = text
            .chars()
            .map(|ch| self.encode_char(phrase, ch).map(PackedByte::to_byte))
            .collect::<Result<Vec<u8>>>()?;
        let len = bytes.len();
        Ok((bytes, len))
    }

    /// Encode the whole corpus into one stream with its offset table
    pub fn encode_all<S: AsRef<str>>(&self, phrases: &[S]) -> Result<PhraseStream> {
        let mut bytes = Vec::new();
        let mut lengths = Vec::with_capacity(phrases.len());
        for (index, phrase) in phrases.iter().enumerate() {
            let (encoded, len) = self.encode(index, phrase.as_ref())?;
            bytes.extend_from_slice(&encoded);
            lengths.push(len);
        }
        PhraseStream::from_lengths(bytes, &lengths)
    }
}

/// Concatenated phrase bytes plus a u16 offset per phrase and a final sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseStream {
    bytes: Vec<u8>,
    offsets: Vec<u16>,
}

impl PhraseStream {
    /// Build the offset table as a running sum of phrase lengths
    pub fn from_lengths(bytes: Vec<u8>, lengths: &[usize]) -> Result<Self> {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut total = 0usize;
        offsets.push(0);
        for len in lengths {
            total += len;
            offsets.push(u16::try_from(total).map_err(|_| FontError::OffsetOverflow(total))?);
        }
        debug_assert_eq!(total, bytes.len());
        Ok(Self { bytes, offsets })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Start offset of each phrase, then the total length
    pub fn offsets(&self) -> &[u16] {
        &self.offsets
    }

    pub fn phrase_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Bytes of phrase `index`
    pub fn phrase(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)? as usize;
        let end = *self.offsets.get(index + 1)? as usize;
        self.bytes.get(start..end)
    }

    /// Unpacked bytes of phrase `index`
    pub fn decode_phrase(&self, index: usize) -> Option<Vec<PackedByte>> {
        self.phrase(index)
            .map(|bytes| bytes.iter().copied().map(PackedByte::from_byte).collect())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
