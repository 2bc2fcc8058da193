//! Uncompressed 24-bit BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod utils;

pub(crate) use decode::{BmpHeader, parse_bmp_header};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;
use enough::Stop;

/// Decode BMP data into a top-down pixel grid.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let header = decode::parse_bmp_header(data)?;
    log::debug!(
        "bmp header: {}x{} {}bpp, offset {}, declared size {}",
        header.width,
        header.height,
        header.bits_per_pixel,
        header.data_offset,
        header.file_size
    );
    check_limits(limits, &header)?;
    stop.check()?;
    decode::decode_bmp_pixels(data, &header, stop)
}

fn check_limits(limits: Option<&Limits>, header: &BmpHeader) -> Result<(), BitmapError> {
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        let out_bytes = u64::from(header.width) * u64::from(header.height) * 3;
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Encode to 24-bit BMP.
pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(grid, stop)
}
