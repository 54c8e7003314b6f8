//! PAL palette loading.
//!
//! A PAL file is 256 RGB triples with 6 bits per channel, optionally preceded
//! by a `PAL0` marker. Channels are scaled by 4 to reach the 8-bit range.

use kirov_common::BinaryReader;

use crate::{Error, Result};

/// Optional marker preceding the colour data.
pub const PAL_MAGIC: &[u8; 4] = b"PAL0";

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// Minimum size of palette data in bytes.
pub const MIN_PALETTE_BYTES: usize = PALETTE_SIZE * 3;

/// An 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 256-colour lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Load a palette from raw PAL bytes.
    ///
    /// Fails if fewer than 768 bytes are given. When a `PAL0` marker pushes
    /// the last triples past the end of the data, those entries stay black.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_PALETTE_BYTES {
            return Err(Error::PaletteTooShort { len: data.len() });
        }

        let mut reader = BinaryReader::new(data);
        if reader.starts_with(PAL_MAGIC) {
            reader.expect_magic(PAL_MAGIC)?;
        }
        let body = reader.remaining_bytes();

        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (color, triple) in colors.iter_mut().zip(body.chunks_exact(3)) {
            *color = Rgb::new(
                triple[0].wrapping_mul(4),
                triple[1].wrapping_mul(4),
                triple[2].wrapping_mul(4),
            );
        }

        Ok(Self { colors })
    }

    /// Build a palette from already scaled colours.
    pub fn from_colors(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Colour at `index`, or `None` past the end of the table.
    #[inline]
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
