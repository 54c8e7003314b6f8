//! Error types for the MIX crate.

use kirov_common::NameHash;
use thiserror::Error;

/// Errors that can occur when working with MIX archives.
///
/// Structural problems in the archive header never show up here; they
/// degrade to an empty or partial index instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] kirov_common::Error),

    /// An indexed entry no longer fits inside the archive file.
    #[error("entry {hash} at offset {offset} with size {size} exceeds archive length {file_len}")]
    EntryOutOfBounds {
        hash: NameHash,
        offset: u64,
        size: u32,
        file_len: u64,
    },

    /// The Blowfish cipher could not be keyed.
    #[error("decryption error: {0}")]
    Decryption(String),
}

/// Result type for MIX operations.
pub type Result<T> = std::result::Result<T, Error>;
