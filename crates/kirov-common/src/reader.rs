//! Binary reader for little-endian parsing of byte slices.
//!
//! Westwood formats are little-endian throughout and store their tables as
//! packed fixed-size records. [`BinaryReader`] walks a slice with a cursor and
//! fails with [`Error::UnexpectedEof`] instead of panicking when a read would
//! run past the end, so truncated files surface as ordinary errors.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A cursor over a byte slice.
///
/// # Example
///
/// ```
/// use kirov_common::BinaryReader;
///
/// let data = [0x10, 0x00, 0x00, 0x00, 0xAA, 0xBB];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_i32().unwrap(), 16);
/// assert_eq!(reader.remaining_bytes(), &[0xAA, 0xBB]);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// The unread tail of the buffer.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read a packed struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` and should be `#[repr(C, packed)]`
    /// so its in-memory size equals its on-disk size.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Read `count` consecutive packed structs.
    ///
    /// The whole table is bounds-checked up front, so a truncated table fails
    /// before any element is produced.
    pub fn read_structs<T: FromBytes>(&mut self, count: usize) -> Result<Vec<T>> {
        let size = std::mem::size_of::<T>();
        let total = size.checked_mul(count).ok_or(Error::UnexpectedEof {
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        self.peek_bytes(total)?;

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_struct()?);
        }
        Ok(out)
    }

    /// Returns true if the unread bytes start with `magic`.
    #[inline]
    pub fn starts_with(&self, magic: &[u8]) -> bool {
        self.remaining_bytes().starts_with(magic)
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}
