//! Error types for the facade crate.

use kirov_common::NameHash;
use thiserror::Error;

/// Errors returned by the high-level helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error, e.g. an unparseable hash string.
    #[error("{0}")]
    Common(#[from] kirov_common::Error),

    /// Archive error.
    #[error("archive error: {0}")]
    Mix(#[from] kirov_mix::Error),

    /// Sprite error.
    #[error("sprite error: {0}")]
    Shp(#[from] kirov_shp::Error),

    /// The palette a sprite needs is not in the archive.
    #[error("palette {0} not found in archive")]
    PaletteNotFound(NameHash),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
