//! Image normalization — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Resample** | Lanczos3 via `image::imageops` |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Quality/bounds types and the fixed ceiling constants
//! - **Codec**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: The [`normalize`] pipeline combining calculations + codec

pub mod codec;
mod calculations;
pub mod operations;
mod params;
pub mod rust_codec;

pub use calculations::calculate_bounded_dimensions;
pub use codec::{CodecError, ImageCodec};
pub use operations::normalize;
pub use params::{Bounds, FALLBACK_QUALITY, Quality, SIZE_CEILING_BYTES};
pub use rust_codec::RustCodec;
