//! SHP(TS) sprite decoding for Red Alert 2 setup assets.
//!
//! Sprites store 8-bit palette indices, optionally run-length encoded per
//! frame. Decoding expands every frame to a BGRA raster through a
//! [`Palette`] loaded from PAL data:
//!
//! - palette index 0 is transparent
//! - every other index is opaque, coloured from the palette
//!
//! Decoding never fails on bad sprite data. A broken header yields an empty
//! [`Sprite`]; a broken frame is left out and recorded in
//! [`Sprite::skipped`]. The only hard error is palette data that is too
//! short.
//!
//! # Example
//!
//! ```no_run
//! use kirov_shp::Sprite;
//!
//! let shp = std::fs::read("intro.shp")?;
//! let pal = std::fs::read("setup.pal")?;
//!
//! let sprite = Sprite::from_bytes(&shp, &pal)?;
//! for frame in &sprite.frames {
//!     println!("frame {}: {}x{}", frame.index, frame.width, frame.height);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod frame;
mod palette;
mod rle;
mod sprite;

pub mod header;

pub use error::{Error, Result, RleError};
pub use frame::{expand_indices, Frame, BYTES_PER_PIXEL};
pub use header::{FrameHeader, SpriteHeader};
pub use palette::{Palette, Rgb, MIN_PALETTE_BYTES, PALETTE_SIZE, PAL_MAGIC};
pub use rle::decode_rle;
pub use sprite::{SkipReason, SkippedFrame, Sprite};
