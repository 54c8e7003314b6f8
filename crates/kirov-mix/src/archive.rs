//! MIX archive reader.
//!
//! The index is built once, from a read-only memory map of the whole file,
//! when the archive is opened. Extraction then opens the file afresh for
//! every call, so one [`MixArchive`] can be shared between threads without
//! any shared cursor.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use kirov_common::NameHash;
use memmap2::Mmap;
use tracing::{debug, warn};

use crate::entry::{IndexStats, MixEntry, MixLayout};
use crate::index::Index;
use crate::{Error, Result};

/// A MIX archive with its member index.
pub struct MixArchive {
    /// Path extraction re-opens.
    path: PathBuf,
    /// Archive file name
    name: String,
    index: Index,
}

impl MixArchive {
    /// Open an archive and build its index.
    ///
    /// Fails only when the file itself cannot be opened or mapped. A file
    /// whose header cannot be understood opens successfully with an empty
    /// index and [`MixLayout::Unknown`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();

        let index = if file_len == 0 {
            Index::empty(MixLayout::Unknown)
        } else {
            // SAFETY: the map is read-only and dropped before this function returns.
            let mmap = unsafe { Mmap::map(&file)? };
            Index::build(&mmap)
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!(archive = %name, file_len, entries = index.entries.len(), "opened MIX archive");

        Ok(Self {
            path: path.to_path_buf(),
            name,
            index,
        })
    }

    /// Path of the archive file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Archive file name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Detected on-disk layout.
    #[inline]
    pub fn layout(&self) -> MixLayout {
        self.index.layout
    }

    /// Number of indexed members.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.index.entries.len()
    }

    /// Counters gathered while building the index.
    #[inline]
    pub fn stats(&self) -> IndexStats {
        self.index.stats
    }

    #[inline]
    pub fn contains(&self, hash: NameHash) -> bool {
        self.index.entries.contains_key(&hash)
    }

    /// Look up an entry by hash.
    #[inline]
    pub fn get(&self, hash: NameHash) -> Option<MixEntry> {
        self.index.entries.get(&hash).copied()
    }

    /// Look up an entry by hex hash string, trying the signed reading first
    /// and the unsigned reinterpretation second.
    pub fn find_hex(&self, hash: &str) -> Result<Option<MixEntry>> {
        let candidates = NameHash::lookup_candidates(hash)?;
        Ok(candidates.into_iter().find_map(|candidate| self.get(candidate)))
    }

    /// All entries, ordered by offset.
    pub fn entries(&self) -> Vec<MixEntry> {
        let mut entries: Vec<MixEntry> = self.index.entries.values().copied().collect();
        entries.sort_by_key(|e| (e.offset, e.hash));
        entries
    }

    /// Extract a member by hash.
    ///
    /// Returns `Ok(None)` when the hash is not indexed or when the entry no
    /// longer fits the file (it may have been truncated since opening).
    /// I/O failures are returned as errors.
    pub fn extract(&self, hash: NameHash) -> Result<Option<Vec<u8>>> {
        let Some(entry) = self.get(hash) else {
            debug!(%hash, archive = %self.name, "member not found");
            return Ok(None);
        };

        match self.read_entry(&entry) {
            Ok(data) => Ok(Some(data)),
            Err(Error::EntryOutOfBounds { file_len, .. }) => {
                warn!(
                    %hash,
                    offset = entry.offset,
                    size = entry.size,
                    file_len,
                    "entry no longer fits archive"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Extract a member by hex hash string.
    ///
    /// An unparseable string is an error; a well-formed hash that matches no
    /// member under either interpretation is `Ok(None)`.
    pub fn extract_hex(&self, hash: &str) -> Result<Option<Vec<u8>>> {
        match self.find_hex(hash)? {
            Some(entry) => self.extract(entry.hash),
            None => {
                debug!(hash, archive = %self.name, "member not found");
                Ok(None)
            }
        }
    }

    /// Read an entry's bytes, failing if it does not fit the current file.
    pub fn read_entry(&self, entry: &MixEntry) -> Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        let file_len = file.metadata()?.len();

        if !entry.fits_within(file_len) {
            return Err(Error::EntryOutOfBounds {
                hash: entry.hash,
                offset: entry.offset,
                size: entry.size,
                file_len,
            });
        }

        file.seek(SeekFrom::Start(entry.offset))?;
        let mut data = vec![0u8; entry.size as usize];
        file.read_exact(&mut data)?;

        debug!(hash = %entry.hash, offset = entry.offset, size = entry.size, "extracted member");
        Ok(data)
    }

    /// Extract several members concurrently.
    ///
    /// Results are returned in the order of `hashes`.
    #[cfg(feature = "parallel")]
    pub fn extract_many(&self, hashes: &[NameHash]) -> Vec<Result<Option<Vec<u8>>>> {
        use rayon::prelude::*;

        hashes.par_iter().map(|&hash| self.extract(hash)).collect()
    }
}

impl std::fmt::Debug for MixArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixArchive")
            .field("name", &self.name)
            .field("layout", &self.index.layout)
            .field("entries", &self.index.entries.len())
            .finish()
    }
}
