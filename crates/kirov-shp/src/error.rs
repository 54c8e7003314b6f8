//! Error types for sprite decoding.

use thiserror::Error;

/// Errors that can occur when decoding sprites.
///
/// Only [`Error::PaletteTooShort`] reaches callers of
/// [`Sprite::from_bytes`](crate::Sprite::from_bytes); header problems make the
/// sprite empty and per-frame problems are collected as
/// [`SkippedFrame`](crate::SkippedFrame) records.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] kirov_common::Error),

    /// Palette data holds fewer than 256 RGB triples.
    #[error("invalid palette: {len} bytes, need at least 768")]
    PaletteTooShort { len: usize },

    /// Sprite header with a width, height or frame count outside `1..=10000`.
    #[error("implausible sprite header: {width}x{height}, {frame_count} frames")]
    ImplausibleHeader {
        width: i16,
        height: i16,
        frame_count: i16,
    },
}

/// Malformed run-length stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
    /// The stream ended inside an opcode.
    #[error("stream truncated at input offset {at}")]
    TruncatedInput { at: usize },

    /// A literal run would write past the end of the frame.
    #[error("literal run of {count} at output offset {at} overruns {capacity}-byte frame")]
    OutputOverrun {
        at: usize,
        count: usize,
        capacity: usize,
    },
}

/// Result type for sprite operations.
pub type Result<T> = std::result::Result<T, Error>;
