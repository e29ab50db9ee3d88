//! Upload-intent gate: decide whether a picked file needs normalization.
//!
//! This is the sole documented caller of [`normalize`](crate::imaging::normalize)
//! and owns the preconditions the normalizer itself does not check:
//!
//! 1. The declared MIME type must start with `image/`.
//! 2. Blobs at or under the size threshold pass through untouched — no
//!    decode, no encode, not even a header read.
//! 3. Blobs over the threshold are normalized.
//!
//! The returned [`UploadPayload`] is what a transport collaborator would put
//! on the wire; the transport itself is out of scope here.

use crate::blob::{NormalizedImage, SourceBlob};
use crate::imaging::{Bounds, CodecError, ImageCodec, Quality, SIZE_CEILING_BYTES, normalize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("not an image: declared type {0:?}")]
    NotAnImage(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Gate settings, usually built from [`UpfitConfig`](crate::config::UpfitConfig).
#[derive(Debug, Clone, Copy)]
pub struct IntakeSettings {
    /// Blobs at or under this byte length skip normalization entirely.
    pub threshold_bytes: usize,
    pub bounds: Bounds,
    pub quality: Quality,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            threshold_bytes: SIZE_CEILING_BYTES,
            bounds: Bounds::default(),
            quality: Quality::default(),
        }
    }
}

/// Payload handed to the upload transport collaborator.
#[derive(Debug)]
pub enum UploadPayload {
    /// The original blob, unmodified (at or under the threshold).
    Original(SourceBlob),
    /// A normalized replacement for an oversized blob.
    Normalized(NormalizedImage),
}

impl UploadPayload {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Original(blob) => &blob.bytes,
            Self::Normalized(img) => &img.bytes,
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            Self::Original(blob) => &blob.mime,
            Self::Normalized(img) => img.mime,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Original(blob) => &blob.file_name,
            Self::Normalized(img) => &img.file_name,
        }
    }

    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized(_))
    }
}

/// Validate and, when oversized, normalize a picked file for upload.
///
/// Takes the blob by value: ownership either passes through unchanged or is
/// consumed by normalization, matching the one-shot upload flow.
pub fn prepare_upload(
    codec: &impl ImageCodec,
    blob: SourceBlob,
    settings: &IntakeSettings,
) -> Result<UploadPayload, IntakeError> {
    if !blob.is_image() {
        return Err(IntakeError::NotAnImage(blob.mime.clone()));
    }

    if blob.len() <= settings.threshold_bytes {
        return Ok(UploadPayload::Original(blob));
    }

    let normalized = normalize(codec, &blob, settings.bounds, settings.quality)?;
    Ok(UploadPayload::Normalized(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::codec::tests::MockCodec;

    fn settings(threshold: usize) -> IntakeSettings {
        IntakeSettings {
            threshold_bytes: threshold,
            bounds: Bounds::new(240, 180),
            quality: Quality::default(),
        }
    }

    #[test]
    fn non_image_is_rejected_before_any_codec_work() {
        let codec = MockCodec::new();
        let blob = SourceBlob::new(vec![0u8; 100], "application/pdf", "grades.pdf");

        let result = prepare_upload(&codec, blob, &settings(10));
        assert!(matches!(result, Err(IntakeError::NotAnImage(m)) if m == "application/pdf"));
        assert!(codec.get_operations().is_empty());
    }

    #[test]
    fn blob_under_threshold_passes_through_untouched() {
        let codec = MockCodec::new();
        let blob = SourceBlob::new(vec![7u8; 50], "image/jpeg", "small.jpg");

        let payload = prepare_upload(&codec, blob, &settings(50)).unwrap();
        assert!(!payload.is_normalized());
        assert_eq!(payload.bytes(), &[7u8; 50][..]);
        assert_eq!(payload.mime(), "image/jpeg");
        // Threshold comparison is inclusive and never decodes
        assert!(codec.get_operations().is_empty());
    }

    #[test]
    fn blob_over_threshold_is_normalized() {
        let codec = MockCodec::with_dimensions(vec![(400, 300)]);
        let blob = SourceBlob::new(vec![0u8; 51], "image/jpeg", "big.jpg");

        let payload = prepare_upload(&codec, blob, &settings(50)).unwrap();
        assert!(payload.is_normalized());
        assert_eq!(payload.mime(), "image/jpeg");
        assert_eq!(payload.file_name(), "big.jpg");

        match payload {
            UploadPayload::Normalized(img) => {
                assert_eq!((img.width, img.height), (240, 180));
            }
            UploadPayload::Original(_) => unreachable!(),
        }
    }

    #[test]
    fn codec_failure_surfaces_as_intake_error() {
        // Oversized blob but no mock dimensions → decode fails
        let codec = MockCodec::new();
        let blob = SourceBlob::new(vec![0u8; 100], "image/png", "broken.png");

        let result = prepare_upload(&codec, blob, &settings(10));
        assert!(matches!(
            result,
            Err(IntakeError::Codec(CodecError::Decode(_)))
        ));
    }

    #[test]
    fn default_threshold_matches_size_ceiling() {
        assert_eq!(IntakeSettings::default().threshold_bytes, SIZE_CEILING_BYTES);
    }
}
