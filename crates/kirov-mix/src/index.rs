//! Index construction for both MIX layouts.
//!
//! Parsing is lenient. A header that cannot be read yields an
//! empty index, and individual records that point outside the file are
//! dropped while the rest of the table is still used.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap;
use kirov_common::{BinaryReader, NameHash};
use rustc_hash::FxHasher;
use tracing::{debug, trace, warn};

use crate::crypto::MixCipher;
use crate::entry::{IndexStats, MixEntry, MixLayout};
use crate::header::{
    padded_table_size, EncryptedPreamble, IndexRecord, PlainHeader, ENCRYPTED_SIGNATURE,
    ENCRYPTED_TABLE_SKIP, MAX_ENTRY_COUNT, PLAIN_HEADER_SIZE,
};
use crate::Result;

pub(crate) type FxHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// A fully built archive index.
#[derive(Debug, Clone)]
pub(crate) struct Index {
    pub layout: MixLayout,
    pub entries: FxHashMap<NameHash, MixEntry>,
    pub stats: IndexStats,
}

impl Index {
    pub fn empty(layout: MixLayout) -> Self {
        Self {
            layout,
            entries: FxHashMap::default(),
            stats: IndexStats::default(),
        }
    }

    /// Build the index from the complete archive contents.
    ///
    /// Never fails: an unreadable header produces an empty index with
    /// [`MixLayout::Unknown`].
    pub fn build(data: &[u8]) -> Self {
        let parsed = if data.starts_with(&ENCRYPTED_SIGNATURE) {
            parse_encrypted(data)
        } else {
            parse_plain(data)
        };

        match parsed {
            Ok(index) => {
                debug!(
                    layout = ?index.layout,
                    declared = index.stats.declared,
                    indexed = index.stats.indexed,
                    skipped = index.stats.skipped,
                    overwritten = index.stats.overwritten,
                    "MIX index built"
                );
                index
            }
            Err(e) => {
                debug!(
                    error = %e,
                    file_len = data.len(),
                    "unreadable MIX header, index left empty"
                );
                Self::empty(MixLayout::Unknown)
            }
        }
    }
}

fn parse_plain(data: &[u8]) -> Result<Index> {
    let mut reader = BinaryReader::new(data);
    let header: PlainHeader = reader.read_struct()?;
    let count = header.entry_count as i32;

    if !(1..=MAX_ENTRY_COUNT).contains(&count) {
        debug!(count, "plain MIX entry count out of range");
        return Ok(Index::empty(MixLayout::Plain));
    }

    let count = count as usize;
    let data_start = PLAIN_HEADER_SIZE + (count * IndexRecord::SIZE) as u64;
    let mut builder = IndexBuilder::new(MixLayout::Plain, data.len() as u64, data_start, count);
    builder.read_records(&mut reader, count);
    Ok(builder.finish())
}

fn parse_encrypted(data: &[u8]) -> Result<Index> {
    let mut reader = BinaryReader::new(data);
    let preamble: EncryptedPreamble = reader.read_struct()?;
    let cipher = MixCipher::new(&preamble.key_source)?;

    let mut header_block = reader.read_array::<8>()?;
    cipher.decrypt_in_place(&mut header_block);
    let count = BinaryReader::new(&header_block).read_i32()?;

    if !(1..=MAX_ENTRY_COUNT).contains(&count) {
        warn!(count, "decrypted MIX entry count out of range");
        return Ok(Index::empty(MixLayout::Encrypted));
    }

    let count = count as usize;
    let padded = padded_table_size(count);

    // A short file yields a short table; its tail records fail to read and are skipped.
    let available = padded.min(reader.remaining());
    let mut table = reader.read_bytes(available)?.to_vec();
    cipher.decrypt_in_place(&mut table);

    let data_start = EncryptedPreamble::DATA_BASE + padded as u64;
    let mut builder =
        IndexBuilder::new(MixLayout::Encrypted, data.len() as u64, data_start, count);

    let records = table.get(ENCRYPTED_TABLE_SKIP..).unwrap_or(&[]);
    let mut table_reader = BinaryReader::new(records);
    builder.read_records(&mut table_reader, count);
    Ok(builder.finish())
}

struct IndexBuilder {
    layout: MixLayout,
    file_len: u64,
    data_start: u64,
    entries: FxHashMap<NameHash, MixEntry>,
    stats: IndexStats,
}

impl IndexBuilder {
    fn new(layout: MixLayout, file_len: u64, data_start: u64, declared: usize) -> Self {
        Self {
            layout,
            file_len,
            data_start,
            entries: FxHashMap::with_capacity_and_hasher(declared, Default::default()),
            stats: IndexStats {
                declared,
                ..IndexStats::default()
            },
        }
    }

    fn read_records(&mut self, reader: &mut BinaryReader<'_>, count: usize) {
        for i in 0..count {
            match reader.read_struct::<IndexRecord>() {
                Ok(record) => self.push(record),
                Err(e) => {
                    let missing = count - i;
                    trace!(error = %e, missing, "index table truncated");
                    self.stats.skipped += missing;
                    break;
                }
            }
        }
    }

    fn push(&mut self, record: IndexRecord) {
        let IndexRecord { hash, offset, size } = record;
        let hash = NameHash(hash);
        let absolute = self.data_start as i64 + offset as i64;
        let file_len = self.file_len as i64;

        if absolute < 0 || absolute >= file_len || size <= 0 || size as i64 > file_len - absolute {
            trace!(%hash, absolute, size, "dropping out-of-bounds index record");
            self.stats.skipped += 1;
            return;
        }

        let entry = MixEntry {
            hash,
            offset: absolute as u64,
            size: size as u32,
        };
        if self.entries.insert(hash, entry).is_some() {
            trace!(%hash, "duplicate hash replaces earlier record");
            self.stats.overwritten += 1;
        }
    }

    fn finish(mut self) -> Index {
        self.stats.indexed = self.entries.len();
        Index {
            layout: self.layout,
            entries: self.entries,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_SOURCE_LEN;
    use byteorder::{LittleEndian, WriteBytesExt};

    fn plain_archive(records: &[(i32, i32, i32)], body: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_i16::<LittleEndian>(records.len() as i16).unwrap();
        out.write_i32::<LittleEndian>(body.len() as i32).unwrap();
        for &(hash, offset, size) in records {
            out.write_i32::<LittleEndian>(hash).unwrap();
            out.write_i32::<LittleEndian>(offset).unwrap();
            out.write_i32::<LittleEndian>(size).unwrap();
        }
        out.extend_from_slice(body);
        out
    }

    fn encrypted_archive(records: &[(i32, i32, i32)], body: &[u8]) -> Vec<u8> {
        let key_source: [u8; KEY_SOURCE_LEN] = std::array::from_fn(|i| (i * 7 + 3) as u8);
        let cipher = MixCipher::new(&key_source).unwrap();

        let mut header_block = Vec::new();
        header_block.write_i32::<LittleEndian>(records.len() as i32).unwrap();
        header_block.write_i32::<LittleEndian>(body.len() as i32).unwrap();
        cipher.encrypt_in_place(&mut header_block);

        let mut table = vec![0u8; ENCRYPTED_TABLE_SKIP];
        for &(hash, offset, size) in records {
            table.write_i32::<LittleEndian>(hash).unwrap();
            table.write_i32::<LittleEndian>(offset).unwrap();
            table.write_i32::<LittleEndian>(size).unwrap();
        }
        table.resize(padded_table_size(records.len()), 0);
        cipher.encrypt_in_place(&mut table);

        let mut out = ENCRYPTED_SIGNATURE.to_vec();
        out.write_u32::<LittleEndian>(0x0002_0000).unwrap();
        out.extend_from_slice(&key_source);
        out.extend_from_slice(&header_block);
        out.extend_from_slice(&table);
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_plain_index() {
        let data = plain_archive(&[(0x11, 0, 4), (0x22, 4, 2)], &[1, 2, 3, 4, 5, 6]);
        let index = Index::build(&data);

        assert_eq!(index.layout, MixLayout::Plain);
        assert_eq!(index.stats.indexed, 2);
        let data_start = PLAIN_HEADER_SIZE + 24;
        assert_eq!(index.entries[&NameHash(0x11)].offset, data_start);
        assert_eq!(index.entries[&NameHash(0x22)].offset, data_start + 4);
        assert_eq!(index.entries[&NameHash(0x22)].size, 2);
    }

    #[test]
    fn test_plain_entries_stay_in_bounds() {
        let data = plain_archive(
            &[(1, 0, 4), (2, 2, 5), (3, -100, 1), (4, 0, 0), (5, 3, -1), (6, 6, 1)],
            &[0; 6],
        );
        let index = Index::build(&data);
        let data_start = PLAIN_HEADER_SIZE + 6 * 12;

        assert_eq!(index.stats.indexed, 1);
        assert_eq!(index.stats.skipped, 5);
        for entry in index.entries.values() {
            assert!(entry.offset >= data_start);
            assert!(entry.end() <= data.len() as u64);
        }
    }

    #[test]
    fn test_plain_count_out_of_range() {
        let mut data = plain_archive(&[(1, 0, 1)], &[9]);
        data[0..2].copy_from_slice(&0i16.to_le_bytes());
        let index = Index::build(&data);
        assert_eq!(index.layout, MixLayout::Plain);
        assert!(index.entries.is_empty());

        data[0..2].copy_from_slice(&10_001i16.to_le_bytes());
        assert!(Index::build(&data).entries.is_empty());

        data[0..2].copy_from_slice(&(-5i16).to_le_bytes());
        assert!(Index::build(&data).entries.is_empty());
    }

    #[test]
    fn test_truncated_header() {
        let index = Index::build(&[1, 0, 0]);
        assert_eq!(index.layout, MixLayout::Unknown);
        assert!(index.entries.is_empty());
    }

    #[test]
    fn test_truncated_table_keeps_leading_records() {
        let mut data = plain_archive(&[(1, 0, 1), (2, 1, 1)], &[]);
        // Cut the second record in half; the first still points at a valid byte.
        data.truncate(6 + 12 + 6);
        data[6 + 4..6 + 8].copy_from_slice(&(-18i32).to_le_bytes());
        let index = Index::build(&data);

        assert_eq!(index.stats.indexed, 1);
        assert_eq!(index.stats.skipped, 1);
    }

    #[test]
    fn test_collision_last_wins() {
        let data = plain_archive(&[(7, 0, 1), (7, 1, 2)], &[0, 1, 2]);
        let index = Index::build(&data);

        assert_eq!(index.stats.indexed, 1);
        assert_eq!(index.stats.overwritten, 1);
        assert_eq!(index.entries[&NameHash(7)].size, 2);
    }

    #[test]
    fn test_encrypted_index() {
        let body = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
        let data = encrypted_archive(&[(0x1234, 0, 3), (-99, 3, 2), (42, 5, 1)], &body);
        let index = Index::build(&data);

        assert_eq!(index.layout, MixLayout::Encrypted);
        assert_eq!(index.stats.declared, 3);
        assert_eq!(index.stats.indexed, 3);

        let data_start = EncryptedPreamble::DATA_BASE + padded_table_size(3) as u64;
        assert_eq!(index.entries[&NameHash(0x1234)].offset, data_start);
        assert_eq!(index.entries[&NameHash(-99)].offset, data_start + 3);
        assert_eq!(index.entries[&NameHash(42)].size, 1);
    }

    #[test]
    fn test_encrypted_even_count_loses_tail_record() {
        // With an even count the padded table has no slack for the two skipped
        // bytes, so the final record runs off the end of the table.
        let data = encrypted_archive(&[(1, 0, 1), (2, 1, 1)], &[7, 8]);
        let index = Index::build(&data);

        assert_eq!(index.stats.indexed, 1);
        assert_eq!(index.stats.skipped, 1);
        assert!(index.entries.contains_key(&NameHash(1)));
    }

    #[test]
    fn test_encrypted_last_record_needs_padding() {
        // One record: 2 skip bytes + 12 record bytes fit in the 16-byte padded table.
        let data = encrypted_archive(&[(5, 0, 1)], &[1]);
        let index = Index::build(&data);
        assert_eq!(index.stats.indexed, 1);
    }

    #[test]
    fn test_encrypted_truncated_preamble() {
        let mut data = encrypted_archive(&[(5, 0, 1)], &[1]);
        data.truncate(40);
        let index = Index::build(&data);
        assert_eq!(index.layout, MixLayout::Unknown);
        assert!(index.entries.is_empty());
    }

    /// Re-encrypt the header block of an archive built by `encrypted_archive`
    /// so it declares `count` entries.
    fn set_encrypted_count(data: &mut [u8], count: i32) {
        let key_source: [u8; KEY_SOURCE_LEN] = data[8..8 + KEY_SOURCE_LEN].try_into().unwrap();
        let cipher = MixCipher::new(&key_source).unwrap();

        let mut header_block = Vec::new();
        header_block.write_i32::<LittleEndian>(count).unwrap();
        header_block.write_i32::<LittleEndian>(0).unwrap();
        cipher.encrypt_in_place(&mut header_block);

        let start = 8 + KEY_SOURCE_LEN;
        data[start..start + 8].copy_from_slice(&header_block);
    }

    #[test]
    fn test_encrypted_count_out_of_range() {
        for count in [0, -1, MAX_ENTRY_COUNT + 1] {
            let mut data = encrypted_archive(&[(5, 0, 1)], &[1]);
            set_encrypted_count(&mut data, count);
            let index = Index::build(&data);

            assert_eq!(index.layout, MixLayout::Encrypted);
            assert!(index.entries.is_empty());
            assert_eq!(index.stats, IndexStats::default());
        }
    }

    #[test]
    fn test_encrypted_count_at_limit_is_accepted() {
        let mut data = encrypted_archive(&[(5, 0, 1)], &[1]);
        set_encrypted_count(&mut data, MAX_ENTRY_COUNT);
        let index = Index::build(&data);

        // The table is far shorter than 10000 records; everything past the
        // first is unreadable.
        assert_eq!(index.layout, MixLayout::Encrypted);
        assert_eq!(index.stats.declared, MAX_ENTRY_COUNT as usize);
        assert_eq!(index.stats.indexed + index.stats.skipped, MAX_ENTRY_COUNT as usize);
    }

    #[test]
    fn test_encrypted_truncated_table() {
        let mut data = encrypted_archive(&[(1, 0, 1), (2, 1, 1), (3, 2, 1)], &[7, 8, 9]);
        // Keep the preamble, the header block and 16 of the 40 table bytes.
        data.truncate(EncryptedPreamble::DATA_BASE as usize + 4 + 16);
        let index = Index::build(&data);

        assert_eq!(index.layout, MixLayout::Encrypted);
        assert_eq!(index.stats.declared, 3);
        assert!(index.entries.is_empty());
        assert_eq!(index.stats.skipped, 3);
    }
}
