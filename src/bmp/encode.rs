//! BMP encoder: uncompressed 24-bit BMP.

use enough::Stop;

use super::utils::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXEL_DATA_OFFSET, RESOLUTION_PPM, row_padding};
use crate::error::BitmapError;
use crate::pixel::PixelGrid;

/// Encode a grid to a 24-bit bottom-up BMP.
pub(crate) fn encode_bmp(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    if grid.is_empty() {
        return Err(BitmapError::EmptyImage);
    }
    let too_large = || BitmapError::DimensionsTooLarge {
        width: grid.width() as u64,
        height: grid.height() as u64,
    };
    let width = i32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = i32::try_from(grid.height()).map_err(|_| too_large())?;

    let row_bytes = grid.width() as u64 * 3;
    let pad_bytes = row_padding(row_bytes);
    let pixel_data_size = (row_bytes + pad_bytes)
        .checked_mul(grid.height() as u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(PIXEL_DATA_OFFSET)
        .ok_or_else(too_large)?;

    stop.check()?;

    let mut out = Vec::with_capacity(file_size as usize);
    write_bmp_header(&mut out, file_size, pixel_data_size, width, height);

    for (idx, row) in grid.rows().rev().enumerate() {
        if idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes as usize));
    }

    Ok(out)
}

fn write_bmp_header(out: &mut Vec<u8>, file_size: u32, pixel_data_size: u32, width: i32, height: i32) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    debug_assert_eq!(out.len(), (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize);
}
