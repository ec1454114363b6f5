//! Artifact rendering and writing
//!
//! Every artifact is rendered in memory first; files are only touched once
//! the whole set exists, so a failed build leaves the output directory alone.
//! Writes are staged into temporary files next to their targets and moved
//! into place together.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use microfont::{BuildOutput, preview};
use tempfile::NamedTempFile;

const PREVIEW_GAP: u32 = 2;

/// Rendered file name and contents
pub struct Artifact {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl Artifact {
    fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), contents: contents.into() }
    }
}

/// Render every artifact of a build
pub fn render(output: &BuildOutput, name: &str, with_preview: bool) -> Result<Vec<Artifact>> {
    let mut artifacts = vec![
        Artifact::new(format!("{name}_font.c.inc"), output.atlas_source(name)),
        Artifact::new(format!("{name}_phrases.c.inc"), output.phrases_source(name)),
        Artifact::new(format!("{name}_font.bin"), output.atlas_bytes.clone()),
        Artifact::new(format!("{name}_phrases.bin"), output.stream.bytes().to_vec()),
        Artifact::new(format!("{name}_atlas.png"), encode_png(&output.atlas.to_image())?),
        Artifact::new(
            format!("{name}_manifest.json"),
            output.manifest_json().context("serializing manifest")?,
        ),
    ];
    if with_preview {
        artifacts.push(Artifact::new(format!("{name}_preview.png"), encode_png(&preview_sheet(output))?));
    }
    Ok(artifacts)
}

/// Write artifacts into `dir`, creating it if needed
///
/// On error no artifact of this set is left behind: staged files are
/// dropped and files already moved into place are removed again.
pub fn write_all(dir: &Path, artifacts: &[Artifact]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let staged = artifacts
        .iter()
        .map(|artifact| stage(dir, artifact))
        .collect::<Result<Vec<_>>>()?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (file, artifact) in staged.into_iter().zip(artifacts) {
        let path = dir.join(&artifact.file_name);
        if let Err(err) = file.persist(&path) {
            for done in &written {
                if let Err(remove_err) = fs::remove_file(done) {
                    tracing::warn!("Could not remove {}: {}", done.display(), remove_err);
                }
            }
            return Err(err).with_context(|| format!("writing {}", path.display()));
        }
        tracing::info!("Wrote {} ({} bytes)", path.display(), artifact.contents.len());
        written.push(path);
    }
    Ok(())
}

fn stage(dir: &Path, artifact: &Artifact) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("staging {} in {}", artifact.file_name, dir.display()))?;
    file.write_all(&artifact.contents)
        .with_context(|| format!("staging {}", artifact.file_name))?;
    Ok(file)
}

/// All phrases rendered top to bottom, black on white
fn preview_sheet(output: &BuildOutput) -> RgbaImage {
    let min_width = output.widths.min_width();
    let lines: Vec<_> = (0..output.stream.phrase_count())
        .filter_map(|i| preview::render_phrase(&output.atlas, min_width, &output.stream, i))
        .collect();

    let line_height = output.atlas.glyph_height() + PREVIEW_GAP;
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0).max(1);
    let height = (line_height * lines.len() as u32).max(1);
    let mut sheet = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for (row, line) in lines.iter().enumerate() {
        let image = preview::to_image(line, Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255]));
        image::imageops::overlay(&mut sheet, &image, 0, i64::from(row as u32 * line_height));
    }
    sheet
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).context("encoding PNG")?;
    Ok(buf.into_inner())
}
