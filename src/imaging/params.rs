//! Parameter types and fixed policy constants for normalization.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides how an image is normalized) and the
//! [`codec`](super::codec) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality factor in (0, 1]. Clamped on construction.
//! - [`Bounds`] — Maximum output dimensions (default 2400×1800).
//!
//! ## Constants
//!
//! - [`SIZE_CEILING_BYTES`] — 3 MiB byte-size ceiling evaluated after the first encode.
//! - [`FALLBACK_QUALITY`] — 0.95, the quality of the single extra encode pass.
//!
//! The ceiling and fallback quality are deliberately constants rather than
//! configuration: the pipeline makes at most two encode attempts, and the
//! second one's parameters never vary.

/// Quality factor for lossy image encoding, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(pub f32);

impl Quality {
    /// Clamped to (0, 1]; NaN (which `f32::clamp` would pass through) falls
    /// back to the default factor.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.01, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Integer percentage for codecs that take 1–100.
    pub fn as_percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.8)
    }
}

/// Byte-size ceiling evaluated against the first encode's output.
pub const SIZE_CEILING_BYTES: usize = 3 * 1024 * 1024;

/// Quality of the single fallback encode attempted when the first result
/// exceeds [`SIZE_CEILING_BYTES`]. That result is accepted regardless of size.
pub const FALLBACK_QUALITY: Quality = Quality(0.95);

/// Maximum output dimensions for normalized images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Bounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            max_width: 2400,
            max_height: 1800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0.0).value(), 0.01);
        assert_eq!(Quality::new(-1.0).value(), 0.01);
        assert_eq!(Quality::new(0.5).value(), 0.5);
        assert_eq!(Quality::new(1.5).value(), 1.0);
    }

    #[test]
    fn quality_handles_non_finite_input() {
        assert_eq!(Quality::new(f32::NAN).value(), 0.8);
        assert_eq!(Quality::new(f32::INFINITY).value(), 1.0);
        assert_eq!(Quality::new(f32::NEG_INFINITY).value(), 0.01);
    }

    #[test]
    fn quality_default_is_point_eight() {
        assert_eq!(Quality::default().value(), 0.8);
    }

    #[test]
    fn quality_as_percent_rounds() {
        assert_eq!(Quality::new(0.8).as_percent(), 80);
        assert_eq!(Quality::new(0.954).as_percent(), 95);
        assert_eq!(Quality::new(1.0).as_percent(), 100);
        assert_eq!(Quality::new(0.01).as_percent(), 1);
    }

    #[test]
    fn fallback_quality_is_ninety_five_percent() {
        assert_eq!(FALLBACK_QUALITY.as_percent(), 95);
    }

    #[test]
    fn size_ceiling_is_three_mebibytes() {
        assert_eq!(SIZE_CEILING_BYTES, 3_145_728);
    }

    #[test]
    fn bounds_default() {
        let b = Bounds::default();
        assert_eq!((b.max_width, b.max_height), (2400, 1800));
    }
}
