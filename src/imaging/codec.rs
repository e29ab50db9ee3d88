//! Image codec trait and error taxonomy.
//!
//! The [`ImageCodec`] trait defines the two platform capabilities the
//! normalizer needs: decode a binary blob into a bitmap, and encode a bitmap
//! back into lossy bytes at a quality factor.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec) — pure Rust, statically
//! linked. Tests use the recording [`MockCodec`](tests::MockCodec) so
//! pipeline logic can be exercised without real pixel work.

use super::params::Quality;
use image::DynamicImage;
use thiserror::Error;

/// Terminal failures of the two codec capabilities.
///
/// Both propagate to the caller unchanged: there is no retry, no logging,
/// and no partial result. The one fallback encode pass in the pipeline is
/// triggered by an oversized *success*, never by one of these.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Trait for image codecs.
///
/// `decode` and `encode` are the pipeline's only suspension points; each
/// resolves exactly once per call and the decoded bitmap is exclusively
/// owned by the invocation that produced it.
pub trait ImageCodec: Sync {
    /// Decode a binary blob into an in-memory bitmap.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError>;

    /// Encode a bitmap as lossy JPEG bytes at the given quality factor.
    fn encode(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError>;
}
