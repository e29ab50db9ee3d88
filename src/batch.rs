//! Batch runs over files on disk.
//!
//! The library core ([`intake`](crate::intake), [`imaging`](crate::imaging))
//! is bytes-in/bytes-out; this module is the filesystem rim around it for the
//! CLI: read each input, derive the MIME type a browser would declare from
//! the extension, push it through the intake gate, and write the resulting
//! payload to the output directory.
//!
//! Per-file failures (unreadable file, unknown extension, undecodable bytes)
//! are folded into the report as [`Outcome::Failed`] so one bad input does
//! not abort the batch. Only an unusable output directory is a hard error.
//!
//! Files are processed in parallel with [rayon](https://docs.rs/rayon);
//! the thread pool is configured by the caller (see
//! [`config::effective_threads`](crate::config::effective_threads)).

use crate::blob::{SourceBlob, mime_for_extension};
use crate::imaging::{ImageCodec, calculate_bounded_dimensions};
use crate::intake::{IntakeSettings, UploadPayload, prepare_upload};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of handling one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    /// Oversized input replaced by a bounded JPEG.
    Normalized { fallback_used: bool },
    /// Input at or under the threshold, written out unchanged.
    PassedThrough,
    Failed { reason: String },
}

/// Per-file result row of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub source_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dimensions: Option<(u32, u32)>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileReport {
    fn failed(file: String, source_bytes: usize, reason: String) -> Self {
        Self {
            file,
            source_bytes,
            output_file: None,
            output_bytes: None,
            output_dimensions: None,
            outcome: Outcome::Failed { reason },
        }
    }
}

/// Run the upload-preparation flow over many files, writing payloads to
/// `out_dir`. Returns one report per input, in input order.
pub fn process_files(
    codec: &impl ImageCodec,
    files: &[PathBuf],
    out_dir: &Path,
    settings: &IntakeSettings,
) -> std::io::Result<Vec<FileReport>> {
    fs::create_dir_all(out_dir)?;

    Ok(files
        .par_iter()
        .map(|path| process_file(codec, path, out_dir, settings))
        .collect())
}

fn process_file(
    codec: &impl ImageCodec,
    path: &Path,
    out_dir: &Path,
    settings: &IntakeSettings,
) -> FileReport {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileReport::failed(name, 0, e.to_string()),
    };
    let source_bytes = bytes.len();

    // The library contract takes a declared MIME type; on disk the extension
    // is the closest stand-in for what a browser would declare.
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
        .unwrap_or("application/octet-stream");

    let blob = SourceBlob::new(bytes, mime, name.clone());
    let payload = match prepare_upload(codec, blob, settings) {
        Ok(payload) => payload,
        Err(e) => return FileReport::failed(name, source_bytes, e.to_string()),
    };

    // Normalized outputs are JPEG regardless of input format, so they get a
    // .jpg name on disk even though the in-memory payload keeps the source name.
    let out_name = match &payload {
        UploadPayload::Normalized(_) => {
            let stem = Path::new(&name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone());
            format!("{stem}.jpg")
        }
        UploadPayload::Original(_) => name.clone(),
    };

    let out_path = out_dir.join(&out_name);
    if let Err(e) = fs::write(&out_path, payload.bytes()) {
        return FileReport::failed(name, source_bytes, e.to_string());
    }

    let (outcome, output_dimensions) = match &payload {
        UploadPayload::Normalized(img) => (
            Outcome::Normalized {
                fallback_used: img.fallback_used,
            },
            Some((img.width, img.height)),
        ),
        UploadPayload::Original(_) => (Outcome::PassedThrough, None),
    };

    FileReport {
        file: name,
        source_bytes,
        output_file: Some(out_name),
        output_bytes: Some(payload.bytes().len()),
        output_dimensions,
        outcome,
    }
}

/// What a batch run *would* do with a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PlannedAction {
    PassThrough,
    Normalize { width: u32, height: u32 },
    Reject { reason: String },
}

/// Dry-run result row for the `check` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub file: String,
    pub source_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    #[serde(flatten)]
    pub action: PlannedAction,
}

/// Inspect files without writing anything: report source dimensions and the
/// action a run would take. Decodes every image (the real flow would not
/// decode under-threshold files) so the report can show dimensions.
pub fn inspect_files(
    codec: &impl ImageCodec,
    files: &[PathBuf],
    settings: &IntakeSettings,
) -> Vec<Inspection> {
    files
        .iter()
        .map(|path| inspect_file(codec, path, settings))
        .collect()
}

fn inspect_file(codec: &impl ImageCodec, path: &Path, settings: &IntakeSettings) -> Inspection {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let reject = |bytes: usize, reason: String| Inspection {
        file: name.clone(),
        source_bytes: bytes,
        dimensions: None,
        action: PlannedAction::Reject { reason },
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return reject(0, e.to_string()),
    };
    let source_bytes = bytes.len();

    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
        .is_some();
    if !is_image {
        return reject(source_bytes, "not an image".to_string());
    }

    let decoded = match codec.decode(&bytes) {
        Ok(img) => img,
        Err(e) => return reject(source_bytes, e.to_string()),
    };
    let dims = (decoded.width(), decoded.height());

    let action = if source_bytes <= settings.threshold_bytes {
        PlannedAction::PassThrough
    } else {
        let (w, h) = calculate_bounded_dimensions(
            dims,
            settings.bounds.max_width,
            settings.bounds.max_height,
        );
        PlannedAction::Normalize {
            width: w,
            height: h,
        }
    };

    Inspection {
        file: name,
        source_bytes,
        dimensions: Some(dims),
        action,
    }
}
