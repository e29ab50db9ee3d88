//! The normalize pipeline.
//!
//! [`normalize`] combines the dimension calculations with codec execution:
//! decode, resample to bounded dimensions, encode, and at most one fallback
//! encode when the first result is oversized. It is a pure single-shot
//! transform — no retained state, no side effects beyond the returned value,
//! and no cancellation once started.

use super::calculations::calculate_bounded_dimensions;
use super::codec::{CodecError, ImageCodec};
use super::params::{Bounds, FALLBACK_QUALITY, Quality, SIZE_CEILING_BYTES};
use crate::blob::{JPEG_MIME, NormalizedImage, SourceBlob};
use image::imageops::FilterType;
use std::time::SystemTime;

/// Result type for normalize operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Normalize a source blob into a bounded-dimension, best-effort
/// bounded-size JPEG.
///
/// The caller is responsible for the `image/*` MIME precondition; this
/// function does not re-validate it and decodes whatever bytes it is given.
///
/// Sequencing is strictly: decode → resample → first encode → (optional)
/// fallback encode. When the first encode's output exceeds
/// [`SIZE_CEILING_BYTES`], exactly one more encode at [`FALLBACK_QUALITY`]
/// runs and its result is returned even if still over the ceiling. Dimensions
/// within bounds are left untouched but the image is re-encoded regardless.
///
/// # Errors
///
/// [`CodecError::Decode`] when the bytes are not a decodable image,
/// [`CodecError::Encode`] when the codec fails to produce output. Both are
/// terminal; the fallback pass is a quality adjustment on success, not an
/// error-recovery path.
pub fn normalize(
    codec: &impl ImageCodec,
    blob: &SourceBlob,
    bounds: Bounds,
    quality: Quality,
) -> Result<NormalizedImage> {
    let decoded = codec.decode(&blob.bytes)?;
    let source_dims = (decoded.width(), decoded.height());
    let (out_w, out_h) = calculate_bounded_dimensions(source_dims, bounds.max_width, bounds.max_height);

    let scaled = if (out_w, out_h) != source_dims {
        decoded.resize_exact(out_w, out_h, FilterType::Lanczos3)
    } else {
        decoded
    };

    let first = codec.encode(&scaled, quality)?;
    let (bytes, fallback_used) = if first.len() > SIZE_CEILING_BYTES {
        (codec.encode(&scaled, FALLBACK_QUALITY)?, true)
    } else {
        (first, false)
    };

    Ok(NormalizedImage {
        bytes,
        mime: JPEG_MIME,
        file_name: blob.file_name.clone(),
        width: out_w,
        height: out_h,
        modified_at: SystemTime::now(),
        fallback_used,
    })
}
