//! Pointwise color filters.
//!
//! Averages use integer division and scaled values truncate toward zero.
//! Results are not clamped: a value outside 0..=255 keeps only its low 8 bits,
//! the byte an 8-bit BMP writer would store.

use crate::pixel::{Pixel, PixelGrid};

const WHITE: Pixel = Pixel { r: 255, g: 255, b: 255 };
const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

/// Truncate toward zero, then keep the low 8 bits.
fn truncate_channel(value: f64) -> u8 {
    value as i64 as u8
}

fn channel_sum(px: Pixel) -> u32 {
    u32::from(px.r) + u32::from(px.g) + u32::from(px.b)
}

fn average(px: Pixel) -> u32 {
    channel_sum(px) / 3
}

fn scale_channels(px: Pixel, f: impl Fn(u8) -> u8) -> Pixel {
    Pixel::new(f(px.r), f(px.g), f(px.b))
}

/// `255 - (255 - c) * scale`
fn brighten(c: u8, scale: f64) -> u8 {
    truncate_channel(255.0 - f64::from(255 - c) * scale)
}

/// `c * scale`
fn dim(c: u8, scale: f64) -> u8 {
    truncate_channel(f64::from(c) * scale)
}

/// Darken pixels in proportion to their distance from the image center.
///
/// The factor is `(height - distance) / height`, so it can go negative far
/// from the center of wide images; those channels wrap.
pub fn vignette(grid: &PixelGrid) -> PixelGrid {
    let height = grid.height() as f64;
    let center_col = (grid.width() / 2) as i64;
    let center_row = (grid.height() / 2) as i64;
    PixelGrid::from_fn(grid.width(), grid.height(), |row, col| {
        let dx = (col as i64 - center_col) as f64;
        let dy = (row as i64 - center_row) as f64;
        let distance = (dx * dx + dy * dy).sqrt();
        let factor = (height - distance) / height;
        scale_channels(grid.pixel(row, col), |c| truncate_channel(f64::from(c) * factor))
    })
}

/// Brighten light pixels (average >= 170) and darken dark ones (average < 90).
///
/// `scale` is expected in `(0, 1)`.
pub fn clarendon(grid: &PixelGrid, scale: f64) -> PixelGrid {
    grid.map_pixels(|px| match average(px) {
        170.. => scale_channels(px, |c| brighten(c, scale)),
        ..=89 => scale_channels(px, |c| dim(c, scale)),
        _ => px,
    })
}

/// Replace every channel with the integer mean of the three.
pub fn grayscale(grid: &PixelGrid) -> PixelGrid {
    grid.map_pixels(|px| {
        let gray = average(px) as u8;
        Pixel::new(gray, gray, gray)
    })
}

/// Threshold the channel mean at 127 (inclusive) to pure white or black.
pub fn high_contrast(grid: &PixelGrid) -> PixelGrid {
    grid.map_pixels(|px| if average(px) >= 255 / 2 { WHITE } else { BLACK })
}

/// Move every channel toward 255 by `1 - scale`.
pub fn lighten(grid: &PixelGrid, scale: f64) -> PixelGrid {
    grid.map_pixels(|px| scale_channels(px, |c| brighten(c, scale)))
}

/// Multiply every channel by `scale`.
pub fn darken(grid: &PixelGrid, scale: f64) -> PixelGrid {
    grid.map_pixels(|px| scale_channels(px, |c| dim(c, scale)))
}

/// Reduce to white, black, red, green, or blue.
///
/// Channel sum >= 550 gives white and <= 150 gives black; otherwise the
/// dominant channel wins, ties resolving red, then green, then blue.
pub fn posterize(grid: &PixelGrid) -> PixelGrid {
    grid.map_pixels(|px| {
        let sum = channel_sum(px);
        let max = px.r.max(px.g).max(px.b);
        if sum >= 550 {
            WHITE
        } else if sum <= 150 {
            BLACK
        } else if max == px.r {
            Pixel::new(255, 0, 0)
        } else if max == px.g {
            Pixel::new(0, 255, 0)
        } else {
            Pixel::new(0, 0, 255)
        }
    })
}
