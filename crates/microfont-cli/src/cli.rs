//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Compile a bitmap font sheet and phrases into a glyph atlas and packed text")]
pub struct Cli {
    /// Font sheet image (PNG), a grid of equally sized cells
    pub font: PathBuf,

    /// Characters of the sheet in grid order; line breaks are ignored
    pub chars: PathBuf,

    /// Phrases to encode, one per line
    pub phrases: PathBuf,

    /// Separator columns at the left of each cell
    #[arg(long, default_value_t = 0)]
    pub border_w: u32,

    /// Separator rows at the top of each cell
    #[arg(long, default_value_t = 0)]
    pub border_h: u32,

    /// Cell width in pixels, border included
    #[arg(long, default_value_t = 8)]
    pub cell_width: u32,

    /// Cell height in pixels, border included
    #[arg(long, default_value_t = 8)]
    pub cell_height: u32,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Prefix for generated C symbols
    #[arg(short, long, default_value = "microfont", value_parser = symbol_parser)]
    pub name: String,

    /// Byte alignment of each glyph block
    #[arg(long = "align", default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub alignment: u16,

    /// Also render every phrase into preview.png
    #[arg(long)]
    pub preview: bool,

    /// Log every pipeline stage
    #[arg(short, long)]
    pub verbose: bool,
}

fn symbol_parser(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(s.to_string())
    } else {
        Err(format!("\"{s}\" is not a valid C identifier"))
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
