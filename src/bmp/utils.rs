//! BMP row geometry and little-endian field helpers.

/// Size of the BITMAPFILEHEADER.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;
/// Size of the BITMAPINFOHEADER.
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel array in files written by this crate.
pub(crate) const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 2835 pixels/meter (72 DPI).
pub(crate) const RESOLUTION_PPM: u32 = 2835;

/// Zero bytes needed after a `row_bytes`-long scanline to reach a multiple of 4.
pub(crate) fn row_padding(row_bytes: u64) -> u64 {
    (4 - row_bytes % 4) % 4
}

/// Read an unsigned little-endian integer of `N` bytes starting at `offset`.
///
/// Byte `i` contributes `byte * 256^i`.
pub(crate) fn read_le<const N: usize>(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(N)?)?;
    Some(
        bytes
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i))),
    )
}
