//! IEEE CRC-32 hashing utilities.
//!
//! Tiberian Sun and Red Alert 2 identify archive members by the CRC-32 of
//! their (normalized) file name instead of storing the name itself.

/// Compute the IEEE CRC-32 of a byte slice.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
