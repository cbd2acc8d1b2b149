//! Conversions between palette-indexed GIF pixels and RGBA buffers.
//!
//! GIF frames store one byte per pixel indexing into an RGB palette of at most
//! 256 entries, with an optional transparent index. Resampling needs full RGBA,
//! so frames are expanded with [`expand_indexed`], resized, then turned back
//! into indices by [`index_pixels`], which rebuilds the palette from the colors
//! the resized frame actually contains.

use image::{Rgba, RgbaImage};
use std::collections::HashMap;

/// Largest palette a GIF frame can carry.
pub const MAX_PALETTE_LEN: usize = 256;

/// Pixels with alpha below this become the transparent entry.
const ALPHA_THRESHOLD: u8 = 128;

/// A palette-indexed pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPixels {
    /// Distinct colors in first-seen order.
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// Palette slot standing for "no pixel", if any pixel was transparent.
    pub transparent: Option<u8>,
}

impl IndexedPixels {
    /// Palette as packed RGB triplets, the layout GIF color tables use.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flatten().copied().collect()
    }
}

/// Expand palette indices into an RGBA image.
///
/// `palette` is packed RGB. Indices past the end of the palette decode as
/// opaque black; the transparent index decodes as fully transparent.
pub fn expand_indexed(
    width: u32,
    height: u32,
    indices: &[u8],
    palette: &[u8],
    transparent: Option<u8>,
) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let i = (y * width + x) as usize;
        let index = indices.get(i).copied().unwrap_or(0);
        if Some(index) == transparent {
            return Rgba([0, 0, 0, 0]);
        }
        let base = index as usize * 3;
        match palette.get(base..base + 3) {
            Some(rgb) => Rgba([rgb[0], rgb[1], rgb[2], 255]),
            None => Rgba([0, 0, 0, 255]),
        }
    })
}

/// Collapse a pixel to its palette key: `None` for transparent, else its RGB.
fn palette_key(px: Rgba<u8>) -> Option<[u8; 3]> {
    let [r, g, b, a] = px.0;
    (a >= ALPHA_THRESHOLD).then_some([r, g, b])
}

/// Rebuild a palette from every pixel of `pixels` and index them against it.
///
/// Colors are collected in first-seen (row-major) order. Alpha is binarized:
/// all pixels under the threshold share a single transparent slot.
///
/// Returns `None` when the image holds more than [`MAX_PALETTE_LEN`] distinct
/// colors; the caller has to quantize instead.
pub fn index_pixels(pixels: &RgbaImage) -> Option<IndexedPixels> {
    let mut lookup: HashMap<Option<[u8; 3]>, u8> = HashMap::new();
    let mut palette: Vec<[u8; 3]> = Vec::new();
    let mut transparent = None;
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.pixels() {
        let key = palette_key(*px);
        let index = match lookup.get(&key) {
            Some(&index) => index,
            None => {
                if palette.len() == MAX_PALETTE_LEN {
                    return None;
                }
                let index = palette.len() as u8;
                palette.push(key.unwrap_or([0, 0, 0]));
                if key.is_none() {
                    transparent = Some(index);
                }
                lookup.insert(key, index);
                index
            }
        };
        indices.push(index);
    }

    Some(IndexedPixels {
        palette,
        indices,
        transparent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_keeps_first_seen_order() {
        let img = RgbaImage::from_fn(3, 2, |x, _| match x {
            0 => Rgba([0, 0, 255, 255]),
            1 => Rgba([255, 0, 0, 255]),
            _ => Rgba([0, 0, 255, 255]),
        });
        let indexed = index_pixels(&img).unwrap();
        assert_eq!(indexed.palette, vec![[0, 0, 255], [255, 0, 0]]);
        assert_eq!(indexed.indices, vec![0, 1, 0, 0, 1, 0]);
        assert_eq!(indexed.transparent, None);
    }

    #[test]
    fn palette_contains_every_pixel_color() {
        let img = RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 7, 255]));
        let indexed = index_pixels(&img).unwrap();
        assert_eq!(indexed.palette.len(), 256);
        for (px, &index) in img.pixels().zip(&indexed.indices) {
            let [r, g, b, _] = px.0;
            assert_eq!(indexed.palette[index as usize], [r, g, b]);
        }
    }

    #[test]
    fn too_many_colors_is_none() {
        let img = RgbaImage::from_fn(257, 1, |x, _| Rgba([(x % 256) as u8, (x / 256) as u8, 0, 255]));
        assert!(index_pixels(&img).is_none());
    }

    #[test]
    fn low_alpha_pixels_share_transparent_slot() {
        let img = RgbaImage::from_fn(4, 1, |x, _| match x {
            0 => Rgba([10, 20, 30, 255]),
            1 => Rgba([0, 0, 0, 0]),
            2 => Rgba([99, 99, 99, 40]),
            _ => Rgba([10, 20, 30, 200]),
        });
        let indexed = index_pixels(&img).unwrap();
        assert_eq!(indexed.palette.len(), 2);
        assert_eq!(indexed.transparent, Some(1));
        assert_eq!(indexed.indices, vec![0, 1, 1, 0]);
    }

    #[test]
    fn expand_maps_transparent_and_out_of_range() {
        let palette = [255, 0, 0, 0, 255, 0];
        let img = expand_indexed(3, 1, &[0, 1, 5], &palette, Some(1));
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(img.get_pixel(2, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn palette_bytes_are_packed_rgb() {
        let indexed = IndexedPixels {
            palette: vec![[1, 2, 3], [4, 5, 6]],
            indices: vec![0, 1],
            transparent: None,
        };
        assert_eq!(indexed.palette_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }
}
