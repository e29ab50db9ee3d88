//! Value types passed through the upload flow.
//!
//! A [`SourceBlob`] is what the caller hands us: the raw bytes of a picked
//! file plus the MIME type and name it was declared with. A
//! [`NormalizedImage`] is what the normalizer hands back: re-encoded JPEG
//! bytes with their final dimensions and a fresh modification timestamp.
//! Neither type touches the filesystem; ownership moves forward through the
//! pipeline and nothing is retained after the upload attempt.

use std::time::SystemTime;

/// MIME type of every normalized output, regardless of input format.
pub const JPEG_MIME: &str = "image/jpeg";

/// A user-selected file as presented to the upload flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlob {
    pub bytes: Vec<u8>,
    /// Declared MIME type (e.g. `image/png`). Declared, not sniffed — the
    /// intake gate trusts it the way a browser trusts `File.type`.
    pub mime: String,
    pub file_name: String,
}

impl SourceBlob {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            file_name: file_name.into(),
        }
    }

    /// Byte length of the payload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared MIME type marks this blob as an image.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Output of a normalize run: bounded-dimension JPEG bytes ready for upload.
///
/// The file name is inherited from the source unchanged; only the MIME type
/// and bytes are rewritten. `modified_at` is assigned at creation time.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub modified_at: SystemTime,
    /// True when the first encode exceeded the size ceiling and the single
    /// fallback pass produced these bytes instead.
    pub fallback_used: bool,
}

impl NormalizedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Map a file extension to the MIME type a browser would declare for it.
///
/// Only extensions with compiled-in decoders are listed; anything else gets
/// `None` and will be rejected by the intake gate.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
