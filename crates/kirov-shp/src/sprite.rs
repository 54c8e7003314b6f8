//! SHP(TS) sprite decoding.
//!
//! A sprite is an 8-byte [`SpriteHeader`], a table of 24-byte
//! [`FrameHeader`]s, and the frames' pixel data. Each frame's data runs from
//! its `data_offset` to the next frame's `data_offset`, or to the end of the
//! file for the last frame.

use kirov_common::BinaryReader;
use thiserror::Error;
use tracing::{debug, trace};

use crate::error::RleError;
use crate::frame::{expand_indices, Frame};
use crate::header::{FrameHeader, SpriteHeader};
use crate::palette::Palette;
use crate::rle::decode_rle;
use crate::{Error, Result};

/// Why a frame was left out of a decoded sprite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("data offset {offset} outside {len}-byte sprite")]
    InvalidOffset { offset: i32, len: usize },

    #[error("non-positive data length {length}")]
    EmptyData { length: i64 },

    #[error("data range {start}..{end} outside {len}-byte sprite")]
    DataOutOfBounds { start: usize, end: usize, len: usize },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i16, height: i16 },

    #[error(transparent)]
    Rle(#[from] RleError),
}

/// A frame that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    /// Position in the frame table.
    pub index: usize,
    pub reason: SkipReason,
}

/// A decoded sprite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sprite {
    /// Canvas width from the sprite header (0 if the header was rejected).
    pub width: usize,
    /// Canvas height from the sprite header (0 if the header was rejected).
    pub height: usize,
    /// Frame count declared by the header.
    pub declared_frames: usize,
    /// Successfully decoded frames, in frame table order.
    pub frames: Vec<Frame>,
    /// Frames that were dropped, with the reason.
    pub skipped: Vec<SkippedFrame>,
}

impl Sprite {
    /// Decode sprite bytes against raw PAL bytes.
    ///
    /// The palette is the only hard requirement: palette data shorter than
    /// 768 bytes is an error. Everything wrong with the sprite itself
    /// degrades to fewer (or zero) frames.
    pub fn from_bytes(data: &[u8], palette_data: &[u8]) -> Result<Self> {
        let palette = Palette::from_bytes(palette_data)?;
        Ok(Self::decode(data, &palette))
    }

    /// Decode sprite bytes against a loaded palette.
    ///
    /// An unreadable or implausible header, or a truncated frame table,
    /// yields an empty sprite. Individual broken frames are recorded in
    /// [`skipped`](Self::skipped) and do not affect the others.
    pub fn decode(data: &[u8], palette: &Palette) -> Self {
        let (header, frame_headers) = match parse_tables(data) {
            Ok(tables) => tables,
            Err(e) => {
                debug!(error = %e, len = data.len(), "unparseable sprite");
                return Self::default();
            }
        };

        let mut sprite = Self {
            width: header.width as usize,
            height: header.height as usize,
            declared_frames: frame_headers.len(),
            frames: Vec::with_capacity(frame_headers.len()),
            skipped: Vec::new(),
        };

        for index in 0..frame_headers.len() {
            match decode_frame(data, &frame_headers, index, palette) {
                Ok(frame) => sprite.frames.push(frame),
                Err(reason) => {
                    trace!(index, %reason, "skipping frame");
                    sprite.skipped.push(SkippedFrame { index, reason });
                }
            }
        }

        debug!(
            width = sprite.width,
            height = sprite.height,
            declared = sprite.declared_frames,
            decoded = sprite.frames.len(),
            skipped = sprite.skipped.len(),
            "decoded sprite"
        );
        sprite
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn parse_tables(data: &[u8]) -> Result<(SpriteHeader, Vec<FrameHeader>)> {
    let mut reader = BinaryReader::new(data);
    let header: SpriteHeader = reader.read_struct()?;

    if !header.is_plausible() {
        return Err(Error::ImplausibleHeader {
            width: header.width,
            height: header.height,
            frame_count: header.frame_count,
        });
    }

    let frames = reader.read_structs(header.frame_count as usize)?;
    Ok((header, frames))
}

fn decode_frame(
    data: &[u8],
    headers: &[FrameHeader],
    index: usize,
    palette: &Palette,
) -> std::result::Result<Frame, SkipReason> {
    let header = headers[index];
    let offset = header.data_offset;

    if offset < 0 || offset as usize >= data.len() {
        return Err(SkipReason::InvalidOffset {
            offset,
            len: data.len(),
        });
    }

    let end = match headers.get(index + 1) {
        Some(next) => next.data_offset as i64,
        None => data.len() as i64,
    };
    let length = end - offset as i64;
    if length <= 0 {
        return Err(SkipReason::EmptyData { length });
    }

    let start = offset as usize;
    let end = start + length as usize;
    let Some(raw) = data.get(start..end) else {
        return Err(SkipReason::DataOutOfBounds {
            start,
            end,
            len: data.len(),
        });
    };

    let (width, height) = (header.width, header.height);
    if !header.has_valid_dimensions() {
        return Err(SkipReason::InvalidDimensions { width, height });
    }
    let (width, height) = (width as usize, height as usize);

    let pixels = if header.is_rle() {
        let indices = decode_rle(raw, width, height)?;
        expand_indices(&indices, width, height, palette)
    } else {
        expand_indices(raw, width, height, palette)
    };

    Ok(Frame {
        index,
        x: header.x,
        y: header.y,
        width,
        height,
        pixels,
    })
}
