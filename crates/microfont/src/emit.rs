//! C source emission
//!
//! The constrained renderer includes the artifacts as C arrays. Byte arrays
//! are written 12 values per line, lowercase hex.

use std::fmt::Write;

use crate::codec::PhraseStream;

const BYTES_PER_LINE: usize = 12;
const SHORTS_PER_LINE: usize = 8;

/// Metadata that precedes the atlas array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    pub char_width: u32,
    pub char_height: u32,
    /// Bytes per glyph block, padding included
    pub char_size: usize,
    /// Baseline advance that the 3-bit deltas are added to
    pub spacing_offset: u32,
    pub alignment: usize,
}

/// `unsigned char` array plus its `_len`
pub fn byte_array(name: &str, data: &[u8], aligned: Option<usize>) -> String {
    let mut out = String::new();
    match aligned {
        Some(align) => {
            let _ = writeln!(out, "unsigned char {name}[] __attribute__((aligned({align}))) = {{");
        }
        None => {
            let _ = writeln!(out, "unsigned char {name}[] = {{");
        }
    }
    write_rows(&mut out, data, BYTES_PER_LINE, |b| format!("0x{b:02x}"));
    let _ = writeln!(out, "}};");
    let _ = writeln!(out, "const unsigned int {name}_len = {};", data.len());
    out
}

/// `unsigned short` array plus its `_count`
pub fn short_array(name: &str, data: &[u16]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const unsigned short {name}[] = {{");
    write_rows(&mut out, data, SHORTS_PER_LINE, |v| v.to_string());
    let _ = writeln!(out, "}};");
    let _ = writeln!(out, "const unsigned int {name}_count = {};", data.len());
    out
}

fn write_rows<T: Copy>(out: &mut String, data: &[T], per_line: usize, fmt: impl Fn(T) -> String) {
    let lines = data.chunks(per_line).count();
    for (i, chunk) in data.chunks(per_line).enumerate() {
        let line = chunk.iter().map(|&v| fmt(v)).collect::<Vec<_>>().join(", ");
        let sep = if i + 1 < lines { "," } else { "" };
        let _ = writeln!(out, "  {line}{sep}");
    }
}

/// Atlas defines followed by the nibble-packed glyph array
pub fn atlas_source(prefix: &str, layout: &AtlasLayout, atlas_bytes: &[u8]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#define CHAR_WIDTH  {}", layout.char_width);
    let _ = writeln!(out, "#define CHAR_HEIGHT {}", layout.char_height);
    let _ = writeln!(out, "#define CHAR_SIZE   {}", layout.char_size);
    let _ = writeln!(out, "#define CHAR_SPACING_OFFSET {}", layout.spacing_offset);
    out.push('\n');
    out.push_str(&byte_array(&format!("{prefix}_font"), atlas_bytes, Some(layout.alignment)));
    out
}

/// Phrase bytes followed by the offset table
pub fn phrases_source(prefix: &str, stream: &PhraseStream) -> String {
    let mut out = byte_array(&format!("{prefix}_phrases"), stream.bytes(), None);
    out.push('\n');
    out.push_str(&short_array(&format!("{prefix}_phrase_offsets"), stream.offsets()));
    let _ = writeln!(out, "#define {}_PHRASE_COUNT {}", prefix.to_uppercase(), stream.phrase_count());
    out
}
