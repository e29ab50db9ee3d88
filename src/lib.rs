//! # upfit
//!
//! Bounded-dimension, bounded-size image normalization for upload pipelines.
//! Given a user-selected image that is too big to send as-is, upfit produces
//! a resized, re-encoded JPEG whose dimensions never exceed configured bounds
//! and whose byte size is best-effort bounded by a fixed 3 MiB ceiling.
//!
//! # Architecture: Gate → Normalize
//!
//! The flow mirrors an upload form: a file is picked, its declared type is
//! validated, and only files over a size threshold are touched at all:
//!
//! ```text
//! 1. Intake     blob → validate MIME, compare against threshold
//! 2. Normalize  decode → resample to bounds → encode (≤ 2 passes)
//! 3. Payload    original or normalized bytes, ready for a transport
//! ```
//!
//! The normalizer is a pure single-shot transform: no persisted state, no
//! side effects beyond the returned value, and a deliberately sequential
//! two-pass-max encode policy. When the first encode exceeds the ceiling,
//! exactly one more runs at quality 0.95 and its result is accepted
//! regardless of size — best effort, don't loop.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`blob`] | Value types: [`blob::SourceBlob`] in, [`blob::NormalizedImage`] out |
//! | [`intake`] | Upload-intent gate: MIME precondition + size threshold |
//! | [`imaging`] | The normalize pipeline: dimension math, codec trait, JPEG encoding |
//! | [`batch`] | Filesystem rim for the CLI — parallel runs over many files, report rows |
//! | [`config`] | Sparse `upfit.toml` loading and validation |
//! | [`output`] | CLI output formatting — per-file lines and summaries |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! Every normalized image is JPEG, whatever the input format. Upload
//! endpoints accept it universally, the encoder's single quality knob maps
//! directly onto the two-pass size policy, and one output format keeps the
//! contract with the transport trivial.
//!
//! ## Codec Behind a Trait
//!
//! The pipeline talks to [`imaging::ImageCodec`], not to the `image` crate
//! directly. The production [`imaging::RustCodec`] is pure Rust and
//! statically linked; tests swap in a recording mock so the threshold gate
//! and the two-pass encode policy can be asserted without pixel work.
//!
//! ## Fixed Ceiling, Configurable Bounds
//!
//! Maximum dimensions, first-pass quality, and the intake threshold are
//! configuration. The 3 MiB encode ceiling and the 0.95 fallback quality are
//! constants: the size check exists to decide whether the single fallback
//! pass runs, and that decision never varies per deployment.

pub mod batch;
pub mod blob;
pub mod config;
pub mod imaging;
pub mod intake;
pub mod output;
