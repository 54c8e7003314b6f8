//! Decoded frames and palette expansion.

use crate::palette::Palette;

/// Bytes per BGRA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

const OPAQUE: u8 = 0xFF;

/// A decoded frame as a tightly packed BGRA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position of this frame in the sprite's frame table.
    pub index: usize,
    /// Horizontal placement within the sprite canvas.
    pub x: i16,
    /// Vertical placement within the sprite canvas.
    pub y: i16,
    pub width: usize,
    pub height: usize,
    /// Row-major BGRA pixels, `width * 4` bytes per row.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// BGRA value of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride() + x * BYTES_PER_PIXEL;
        let px = self.pixels.get(start..start + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to an RGBA image buffer.
    #[cfg(feature = "image")]
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let mut rgba = self.pixels.clone();
        for px in rgba.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, rgba)
    }
}

/// Expand palette indices into a BGRA raster of `width * height` pixels.
///
/// Index 0 is fully transparent whatever its palette colour. Every other
/// index is looked up in the palette and drawn opaque; an index the palette
/// does not cover is drawn opaque black. When `indices` is shorter than the
/// frame, the remaining pixels stay transparent.
pub fn expand_indices(indices: &[u8], width: usize, height: usize, palette: &Palette) -> Vec<u8> {
    let pixel_count = width * height;
    let mut pixels = vec![0u8; pixel_count * BYTES_PER_PIXEL];

    for (px, &index) in pixels
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(indices.iter().take(pixel_count))
    {
        if index == 0 {
            continue;
        }
        let bgra = match palette.color(index as usize) {
            Some(color) => [color.b, color.g, color.r, OPAQUE],
            None => [0, 0, 0, OPAQUE],
        };
        px.copy_from_slice(&bgra);
    }

    pixels
}
