//! Pure Rust image codec — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` (format sniffed from magic bytes) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//!
//! Decoding ignores the blob's declared MIME type entirely — the `image`
//! crate identifies the format from the bytes, so a PNG declared as
//! `image/jpeg` still decodes. What cannot be decoded fails with
//! [`CodecError::Decode`].

use super::codec::{CodecError, ImageCodec};
use super::params::Quality;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

/// Production codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
        // JPEG has no alpha; flatten to RGB8 before encoding.
        let rgb = image.to_rgb8();
        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.as_percent());
        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buf)
    }
}
