//! MIX archive entry and index metadata.

use kirov_common::NameHash;

/// Which on-disk layout an archive uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MixLayout {
    /// Header and index table stored in the clear.
    Plain,
    /// Header and index table encrypted with Blowfish.
    Encrypted,
    /// The header could not be read at all.
    Unknown,
}

/// An indexed member of a MIX archive.
///
/// This is metadata only. Use [`MixArchive::extract`](crate::MixArchive::extract)
/// to read the member's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixEntry {
    /// Member name hash.
    pub hash: NameHash,
    /// Absolute byte offset of the member within the archive file.
    pub offset: u64,
    /// Member size in bytes (always non-zero).
    pub size: u32,
}

impl MixEntry {
    /// Exclusive end offset of the member.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.size as u64
    }

    /// Whether the member lies entirely within a file of `file_len` bytes.
    #[inline]
    pub fn fits_within(&self, file_len: u64) -> bool {
        self.size > 0 && self.offset < file_len && self.end() <= file_len
    }
}

/// Bookkeeping gathered while building the index.
///
/// Index construction is lenient: records that point outside the archive are
/// dropped and duplicate hashes replace earlier records. These counters make
/// both visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexStats {
    /// Entry count declared by the header.
    pub declared: usize,
    /// Entries present in the index.
    pub indexed: usize,
    /// Records dropped as invalid or unreadable.
    pub skipped: usize,
    /// Records that replaced an earlier record with the same hash.
    pub overwritten: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_within() {
        let entry = MixEntry {
            hash: NameHash(1),
            offset: 10,
            size: 4,
        };
        assert!(entry.fits_within(14));
        assert!(!entry.fits_within(13));
        assert!(!entry.fits_within(10));
    }

    #[test]
    fn test_zero_size_never_fits() {
        let entry = MixEntry {
            hash: NameHash(1),
            offset: 0,
            size: 0,
        };
        assert!(!entry.fits_within(100));
    }
}
