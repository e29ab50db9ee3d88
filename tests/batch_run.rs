//! Batch runs against real files on disk.
//!
//! Exercises the CLI-shaped flow: inputs in a temp directory, payloads
//! written to an output directory, one report row per input.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use upfit::batch::{self, Outcome, PlannedAction};
use upfit::imaging::{Bounds, Quality, RustCodec};
use upfit::intake::IntakeSettings;

fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let path = dir.join(name);
    let file = fs::File::create(&path).unwrap();
    let writer = std::io::BufWriter::new(file);
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 90);
    encoder
        .encode(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    path
}

fn settings(threshold_bytes: usize) -> IntakeSettings {
    IntakeSettings {
        threshold_bytes,
        bounds: Bounds::new(240, 180),
        quality: Quality::new(0.8),
    }
}

#[test]
fn oversized_jpeg_is_written_as_bounded_jpg() {
    let tmp = TempDir::new().unwrap();
    let input = write_jpeg(tmp.path(), "photo.jpg", 400, 300);
    let out_dir = tmp.path().join("out");

    let reports =
        batch::process_files(&RustCodec::new(), &[input], &out_dir, &settings(10)).unwrap();

    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].outcome, Outcome::Normalized { .. }));
    assert_eq!(reports[0].output_dimensions, Some((240, 180)));

    let out = image::open(out_dir.join("photo.jpg")).unwrap();
    assert_eq!((out.width(), out.height()), (240, 180));
}

#[test]
fn small_file_is_copied_byte_for_byte() {
    let tmp = TempDir::new().unwrap();
    let input = write_jpeg(tmp.path(), "small.jpg", 60, 40);
    let out_dir = tmp.path().join("out");

    let reports = batch::process_files(
        &RustCodec::new(),
        &[input.clone()],
        &out_dir,
        &settings(10 * 1024 * 1024),
    )
    .unwrap();

    assert_eq!(reports[0].outcome, Outcome::PassedThrough);
    assert_eq!(
        fs::read(out_dir.join("small.jpg")).unwrap(),
        fs::read(&input).unwrap()
    );
}

#[test]
fn mixed_batch_reports_per_file_outcomes() {
    let tmp = TempDir::new().unwrap();
    let photo = write_jpeg(tmp.path(), "photo.jpg", 400, 300);
    let notes = tmp.path().join("notes.txt");
    fs::write(&notes, "not an image").unwrap();
    let missing = tmp.path().join("missing.jpg");
    let out_dir = tmp.path().join("out");

    let reports = batch::process_files(
        &RustCodec::new(),
        &[photo, notes, missing],
        &out_dir,
        &settings(10),
    )
    .unwrap();

    assert_eq!(reports.len(), 3);
    assert!(matches!(reports[0].outcome, Outcome::Normalized { .. }));
    assert!(matches!(reports[1].outcome, Outcome::Failed { .. }));
    assert!(matches!(reports[2].outcome, Outcome::Failed { .. }));

    // Failures produce no output files
    assert!(out_dir.join("photo.jpg").exists());
    assert!(!out_dir.join("notes.txt").exists());
}

#[test]
fn corrupt_image_file_fails_with_decode_reason() {
    let tmp = TempDir::new().unwrap();
    let fake = tmp.path().join("fake.jpg");
    fs::write(&fake, vec![0u8; 500]).unwrap();
    let out_dir = tmp.path().join("out");

    let reports =
        batch::process_files(&RustCodec::new(), &[fake], &out_dir, &settings(10)).unwrap();

    match &reports[0].outcome {
        Outcome::Failed { reason } => assert!(reason.contains("decode"), "reason: {reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn check_inspects_without_writing() {
    let tmp = TempDir::new().unwrap();
    let photo = write_jpeg(tmp.path(), "photo.jpg", 400, 300);

    let rows = batch::inspect_files(&RustCodec::new(), &[photo], &settings(10));

    assert_eq!(rows[0].dimensions, Some((400, 300)));
    assert_eq!(
        rows[0].action,
        PlannedAction::Normalize {
            width: 240,
            height: 180
        }
    );
    // Dry run leaves the directory untouched apart from the input
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn json_report_round_trips_through_serde() {
    let tmp = TempDir::new().unwrap();
    let input = write_jpeg(tmp.path(), "photo.jpg", 400, 300);
    let out_dir = tmp.path().join("out");

    let reports =
        batch::process_files(&RustCodec::new(), &[input], &out_dir, &settings(10)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&reports).unwrap()).unwrap();
    assert_eq!(json[0]["outcome"], "normalized");
    assert_eq!(json[0]["output_file"], "photo.jpg");
    assert_eq!(json[0]["output_dimensions"][0], 240);
}
