//! Kirov - Red Alert 2 setup asset extraction library.
//!
//! This crate provides a unified interface to the Kirov crates for reading
//! the assets shipped in Red Alert 2's `Setup.mix`.
//!
//! # Crates
//!
//! - [`kirov_common`] - Common utilities (binary reading, name hashes, CRC32)
//! - [`kirov_mix`] - MIX archive reading (plain and Blowfish-encrypted)
//! - [`kirov_shp`] - SHP(TS) sprite decoding to BGRA frames
//!
//! # Example
//!
//! ```no_run
//! use kirov::prelude::*;
//!
//! let archive = MixArchive::open("Setup.mix")?;
//!
//! if let Some(sprite) = kirov::load_sprite(&archive, "2012EC16", "397C46E0")? {
//!     println!("intro: {} frames", sprite.frame_count());
//! }
//! # Ok::<(), kirov::Error>(())
//! ```

mod error;

pub mod setup;

// Re-export all sub-crates
pub use kirov_common as common;
pub use kirov_mix as mix;
pub use kirov_shp as shp;

pub use error::{Error, Result};

use kirov_common::NameHash;
use kirov_mix::MixArchive;
use kirov_shp::{Palette, Sprite};
use tracing::debug;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use kirov_common::{crc, BinaryReader, NameHash};
    pub use kirov_mix::{locate_setup_mix, IndexStats, MixArchive, MixEntry, MixLayout};
    pub use kirov_shp::{Frame, Palette, Rgb, SkipReason, Sprite};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract a member by hex hash string.
///
/// `Ok(None)` when no member matches; an unparseable hash is an error.
pub fn extract_bytes(archive: &MixArchive, hash: &str) -> Result<Option<Vec<u8>>> {
    Ok(archive.extract_hex(hash)?)
}

/// Decode sprite bytes against raw palette bytes.
pub fn decode_sprite(data: &[u8], palette_data: &[u8]) -> Result<Sprite> {
    Ok(Sprite::from_bytes(data, palette_data)?)
}

/// Extract a sprite and its palette from an archive and decode it.
///
/// A missing sprite is `Ok(None)`. A missing palette is
/// [`Error::PaletteNotFound`], since no sprite can be decoded without one.
pub fn load_sprite(
    archive: &MixArchive,
    sprite_hash: &str,
    palette_hash: &str,
) -> Result<Option<Sprite>> {
    let palette_id = NameHash::parse_hex(palette_hash)?;
    let palette_data = archive
        .extract_hex(palette_hash)?
        .ok_or(Error::PaletteNotFound(palette_id))?;
    let palette = Palette::from_bytes(&palette_data)?;

    let Some(data) = archive.extract_hex(sprite_hash)? else {
        return Ok(None);
    };

    let sprite = Sprite::decode(&data, &palette);
    debug!(
        sprite = sprite_hash,
        palette = palette_hash,
        frames = sprite.frame_count(),
        "loaded sprite"
    );
    Ok(Some(sprite))
}

/// Locate and open the setup archive.
///
/// `Ok(None)` when no candidate location holds a `Setup.mix`.
pub fn open_setup_mix() -> Result<Option<MixArchive>> {
    match kirov_mix::locate_setup_mix() {
        Some(path) => Ok(Some(MixArchive::open(path)?)),
        None => Ok(None),
    }
}
