use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const KEY: Rgba<u8> = Rgba([0, 0, 0, 255]);
const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Three 8x8 cells: "A" is a 2px bar, "B" a 4px bar, then a blank space cell
fn write_inputs(dir: &Path, phrases: &str) {
    let mut sheet = RgbaImage::from_pixel(24, 8, KEY);
    for y in 2..6 {
        for x in 2..4 {
            sheet.put_pixel(x, y, INK);
        }
        for x in 10..14 {
            sheet.put_pixel(x, y, INK);
        }
    }
    sheet.save(dir.join("font.png")).expect("write font sheet");
    fs::write(dir.join("chars.txt"), "AB \n").expect("write chars");
    fs::write(dir.join("phrases.txt"), phrases).expect("write phrases");
}

fn run_microfont(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microfont"))
        .args(["font.png", "chars.txt", "phrases.txt", "--out-dir", "out", "--name", "demo"])
        .args(extra)
        .current_dir(dir)
        .output()
        .expect("run microfont")
}

#[test]
fn test_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path(), "AB\nBA\n");

    let output = run_microfont(dir.path(), &["--preview"]);
    assert!(output.status.success(), "process failed: {output:?}");

    let out = dir.path().join("out");
    for file in [
        "demo_font.c.inc",
        "demo_phrases.c.inc",
        "demo_font.bin",
        "demo_phrases.bin",
        "demo_atlas.png",
        "demo_manifest.json",
        "demo_preview.png",
    ] {
        assert!(out.join(file).exists(), "missing {file}");
    }

    // A advances 3 (delta 0), B advances 5 (delta 2)
    let phrases = fs::read(out.join("demo_phrases.bin")).unwrap();
    assert_eq!(phrases, vec![0x01, 0x42, 0x42, 0x01]);

    let font = fs::read(out.join("demo_font.bin")).unwrap();
    assert_eq!(font.len(), 16);

    let header = fs::read_to_string(out.join("demo_font.c.inc")).unwrap();
    assert!(header.contains("#define CHAR_WIDTH  4"));
    assert!(header.contains("#define CHAR_SPACING_OFFSET 3"));

    let source = fs::read_to_string(out.join("demo_phrases.c.inc")).unwrap();
    assert!(source.contains("demo_phrase_offsets[] = {\n  0, 2, 4\n};"));

    let atlas = image::open(out.join("demo_atlas.png")).unwrap();
    assert_eq!((atlas.width(), atlas.height()), (4, 8));

    let manifest = fs::read_to_string(out.join("demo_manifest.json")).unwrap();
    assert!(manifest.contains("\"glyphs\": \"AB\""));
}

#[test]
fn test_fatal_error_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path(), "AB?\n");

    let output = run_microfont(dir.path(), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'?'"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("not in the glyph table"), "unexpected stderr: {stderr}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_invalid_geometry_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path(), "AB\n");

    let output = run_microfont(dir.path(), &["--border-w", "8"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("out").exists());
}
