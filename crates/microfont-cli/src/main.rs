//! microfont - Command Line Entry Point

mod cli;
mod output;

use std::fs;

use anyhow::{Context, Result};
use microfont::{BuildConfig, FontSheet, GlyphTable, GridGeometry};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &cli::Cli) -> Result<()> {
    let geometry = GridGeometry::new(args.border_w, args.border_h, args.cell_width, args.cell_height)?;
    let config = BuildConfig::new(geometry).with_alignment(usize::from(args.alignment));

    let font = fs::read(&args.font).with_context(|| format!("reading {}", args.font.display()))?;
    let sheet = FontSheet::decode(&font, geometry)
        .with_context(|| format!("decoding {}", args.font.display()))?;

    let chars = fs::read_to_string(&args.chars)
        .with_context(|| format!("reading {}", args.chars.display()))?;
    let table = GlyphTable::parse(&chars);

    let corpus = fs::read_to_string(&args.phrases)
        .with_context(|| format!("reading {}", args.phrases.display()))?;
    let phrases = microfont::split_phrases(&corpus);
    tracing::info!("{} glyphs in table, {} phrases", table.len(), phrases.len());

    let build = microfont::build(&sheet, &table, &phrases, &config).context("build failed")?;
    tracing::info!(
        "Required characters: {}",
        build.required.iter().collect::<String>()
    );
    tracing::info!(
        "New character dimensions after reduction: {}x{}",
        build.crop.width,
        build.crop.height
    );

    let artifacts = output::render(&build, &args.name, args.preview)?;
    output::write_all(&args.out_dir, &artifacts)?;
    Ok(())
}
