//! Common utilities for Kirov.
//!
//! This crate provides foundational types and utilities used across all Kirov crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`NameHash`] - 32-bit member identifiers used by Westwood archives
//! - [`crc`] - IEEE CRC-32 helpers used to derive name hashes

mod error;
mod hash;
mod reader;

pub mod crc;

pub use error::{Error, Result};
pub use hash::NameHash;
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
