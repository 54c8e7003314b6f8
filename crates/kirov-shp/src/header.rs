//! SHP(TS) header structures.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Largest width, height or frame count accepted before a header is
/// considered corrupt.
pub const MAX_DIMENSION: i16 = 10_000;

/// Compression flag bit marking RLE-encoded frame data.
pub const COMPRESSION_RLE: i32 = 0x2;

/// Sprite file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct SpriteHeader {
    /// Should be 0. Not enforced.
    pub zero: i16,
    /// Canvas width.
    pub width: i16,
    /// Canvas height.
    pub height: i16,
    /// Number of frames.
    pub frame_count: i16,
}

impl SpriteHeader {
    pub const SIZE: usize = 8;

    /// Whether width, height and frame count all lie in `1..=10000`.
    pub fn is_plausible(&self) -> bool {
        let range = 1..=MAX_DIMENSION;
        range.contains(&{ self.width })
            && range.contains(&{ self.height })
            && range.contains(&{ self.frame_count })
    }
}

/// Per-frame header. The frame table follows the sprite header directly.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct FrameHeader {
    /// Horizontal placement within the canvas.
    pub x: i16,
    /// Vertical placement within the canvas.
    pub y: i16,
    /// Frame width.
    pub width: i16,
    /// Frame height.
    pub height: i16,
    /// Compression flags; see [`COMPRESSION_RLE`].
    pub compression: i32,
    /// Unknown.
    pub unknown: i32,
    /// Should be 0.
    pub reserved: i32,
    /// Offset of the frame's pixel data from the start of the file.
    pub data_offset: i32,
}

impl FrameHeader {
    pub const SIZE: usize = 24;

    /// Whether width and height both lie in `1..=10000`.
    pub fn has_valid_dimensions(&self) -> bool {
        let range = 1..=MAX_DIMENSION;
        range.contains(&{ self.width }) && range.contains(&{ self.height })
    }

    #[inline]
    pub fn is_rle(&self) -> bool {
        self.compression & COMPRESSION_RLE != 0
    }
}
