//! MIX archive reader for Red Alert 2 setup assets.
//!
//! MIX is Westwood's container format. Members have no stored names; each is
//! identified by a 32-bit [`NameHash`]. Two layouts are supported:
//!
//! - Plain: a 6-byte header and a table of 12-byte index records
//! - Encrypted (`VIMX` signature): the header and index table are Blowfish
//!   encrypted with a key derived from 80 bytes of material in the preamble
//!
//! Index construction tolerates damaged archives. Records pointing outside the
//! file are dropped and counted in [`IndexStats`]; a header that cannot be
//! read at all yields an empty archive rather than an error.
//!
//! # Example
//!
//! ```no_run
//! use kirov_mix::MixArchive;
//!
//! let archive = MixArchive::open("Setup.mix")?;
//! println!("{} members ({:?})", archive.entry_count(), archive.layout());
//!
//! if let Some(palette) = archive.extract_hex("397C46E0")? {
//!     println!("palette: {} bytes", palette.len());
//! }
//! # Ok::<(), kirov_mix::Error>(())
//! ```

mod archive;
mod entry;
mod error;
mod index;
mod locate;

pub mod crypto;
pub mod header;

pub use archive::MixArchive;
pub use entry::{IndexStats, MixEntry, MixLayout};
pub use error::{Error, Result};
pub use kirov_common::NameHash;
pub use locate::{locate_setup_mix, setup_mix_candidates, SETUP_MIX_ENV, SETUP_MIX_NAME};
