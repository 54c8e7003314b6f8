//! On-disk MIX header structures.
//!
//! Two layouts exist. Plain archives start directly with a 6-byte header
//! followed by the index table. Encrypted archives start with a signature,
//! a flags word and 80 bytes of key material, then a Blowfish-encrypted
//! header block and index table.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Signature marking an encrypted archive.
pub const ENCRYPTED_SIGNATURE: [u8; 4] = *b"VIMX";

/// Largest entry count accepted before the header is considered corrupt.
pub const MAX_ENTRY_COUNT: i32 = 10_000;

/// Size of the plain header (entry count + body size).
pub const PLAIN_HEADER_SIZE: u64 = 6;

/// Bytes skipped at the start of a decrypted index table.
pub const ENCRYPTED_TABLE_SKIP: usize = 2;

/// Header of a plain archive.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct PlainHeader {
    /// Number of index records.
    pub entry_count: i16,
    /// Size of the data region. Informational only.
    pub body_size: i32,
}

/// Unencrypted preamble of an encrypted archive.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EncryptedPreamble {
    /// Always [`ENCRYPTED_SIGNATURE`].
    pub signature: [u8; 4],
    /// Archive flags (ignored).
    pub flags: u32,
    /// Material the Blowfish key is derived from.
    pub key_source: [u8; 80],
}

impl EncryptedPreamble {
    /// Base of the data region of an encrypted archive, before adding the
    /// padded index table.
    ///
    /// Member offsets are measured from here, 4 bytes short of the end of
    /// the preamble and header block.
    pub const DATA_BASE: u64 = 92;
}

/// A single index record, identical in both layouts.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct IndexRecord {
    /// Member name hash.
    pub hash: i32,
    /// Offset relative to the start of the data region.
    pub offset: i32,
    /// Member size in bytes.
    pub size: i32,
}

impl IndexRecord {
    pub const SIZE: usize = 12;
}

/// Size of an encrypted index table for `count` records, padded to the
/// Blowfish block size.
pub fn padded_table_size(count: usize) -> usize {
    (count * IndexRecord::SIZE + 7) & !7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_sizes() {
        assert_eq!(std::mem::size_of::<PlainHeader>() as u64, PLAIN_HEADER_SIZE);
        assert_eq!(std::mem::size_of::<IndexRecord>(), IndexRecord::SIZE);
        assert_eq!(std::mem::size_of::<EncryptedPreamble>(), 88);
    }

    #[test]
    fn test_padded_table_size() {
        assert_eq!(padded_table_size(1), 16);
        assert_eq!(padded_table_size(2), 24);
        assert_eq!(padded_table_size(3), 40);
    }
}
