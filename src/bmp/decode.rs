//! BMP decoder for uncompressed 24-bit and alpha-ignoring 32-bit images
//! (BI_RGB, or BI_BITFIELDS with the standard BGRA masks).

use enough::Stop;

use super::utils::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, read_le, row_padding};
use crate::error::BitmapError;
use crate::pixel::{Pixel, PixelGrid};

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// Red, green, blue masks of a BGRX/BGRA pixel.
const BGRA_MASKS: [u32; 3] = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF];

// ── Parsed BMP header info ──────────────────────────────────────────

/// Fields of the file header and BITMAPINFOHEADER that decoding needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    /// Total file size declared at offset 2.
    pub file_size: u32,
    /// Start of the pixel array, declared at offset 10.
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
}

impl BmpHeader {
    pub(crate) fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel / 8)
    }

    /// Stored scanline length without padding.
    pub(crate) fn row_bytes(&self) -> u64 {
        u64::from(self.width) * u64::from(self.bits_per_pixel / 8)
    }

    pub(crate) fn row_stride(&self) -> u64 {
        let row = self.row_bytes();
        row + row_padding(row)
    }

    /// File size implied by the offset and the padded pixel array.
    pub(crate) fn layout_size(&self) -> u64 {
        u64::from(self.data_offset) + self.row_stride() * u64::from(self.height)
    }

    /// Declared file size must match the offset plus padded rows exactly.
    pub(crate) fn check_layout(&self) -> Result<(), BitmapError> {
        let expected = self.layout_size();
        if u64::from(self.file_size) != expected {
            return Err(BitmapError::SizeMismatch {
                declared: u64::from(self.file_size),
                expected,
            });
        }
        Ok(())
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse the 14-byte file header and 40-byte info header.
pub(crate) fn parse_bmp_header(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    let min_len = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize;
    if data.len() < min_len {
        return Err(BitmapError::UnexpectedEof);
    }
    if &data[0..2] != b"BM" {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let u32_at = |offset: usize| read_le::<4>(data, offset).ok_or(BitmapError::UnexpectedEof);

    let file_size = u32_at(2)?;
    let data_offset = u32_at(10)?;
    let info_size = u32_at(14)?;
    let width = u32_at(18)? as i32;
    let height = u32_at(22)? as i32;
    let bits_per_pixel = read_le::<2>(data, 28).ok_or(BitmapError::UnexpectedEof)? as u16;
    let compression = u32_at(30)?;

    if info_size < INFO_HEADER_SIZE {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP info header of {info_size} bytes (need BITMAPINFOHEADER or later)"
        )));
    }
    let header_end = FILE_HEADER_SIZE.checked_add(info_size).ok_or_else(|| {
        BitmapError::InvalidHeader(format!("info header size {info_size} out of range"))
    })?;
    if data_offset < header_end {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {data_offset} overlaps {info_size}-byte info header"
        )));
    }
    if width <= 0 || height <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "unsupported BMP dimensions {width}x{height}"
        )));
    }
    if bits_per_pixel != 24 && bits_per_pixel != 32 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "{bits_per_pixel} bits per pixel"
        )));
    }
    match (compression, bits_per_pixel) {
        (BI_RGB, _) => {}
        (BI_BITFIELDS, 32) => check_bgra_masks(data, data_offset)?,
        _ => {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP compression method {compression} at {bits_per_pixel} bits per pixel"
            )));
        }
    }

    Ok(BmpHeader {
        file_size,
        data_offset,
        width: width as u32,
        height: height as u32,
        bits_per_pixel,
    })
}

/// 32-bit BI_BITFIELDS is accepted only with the plain BGRX channel layout.
///
/// The masks follow the 40-byte info header whether they are part of a
/// larger header or a separate table, so they always start at byte 54.
fn check_bgra_masks(data: &[u8], data_offset: u32) -> Result<(), BitmapError> {
    let masks_end = FILE_HEADER_SIZE + INFO_HEADER_SIZE + 12;
    if data_offset < masks_end {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {data_offset} overlaps bitfield masks"
        )));
    }
    let mask = |i: usize| {
        read_le::<4>(data, (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize + 4 * i)
            .ok_or(BitmapError::UnexpectedEof)
    };
    let masks = [mask(0)?, mask(1)?, mask(2)?];
    if masks != BGRA_MASKS {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP bitfield masks {:#010x}/{:#010x}/{:#010x}",
            masks[0], masks[1], masks[2]
        )));
    }
    Ok(())
}

// ── Pixel decoding ──────────────────────────────────────────────────

/// Read the bottom-up BGR pixel array into a top-down grid.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    header.check_layout()?;

    let w = header.width as usize;
    let h = header.height as usize;
    let stride = usize::try_from(header.row_stride()).map_err(|_| too_large(header))?;
    let start = header.data_offset as usize;
    let end = stride
        .checked_mul(h)
        .and_then(|n| n.checked_add(start))
        .ok_or_else(|| too_large(header))?;
    let pixel_data = data.get(start..end).ok_or(BitmapError::UnexpectedEof)?;

    let pixel_count = w.checked_mul(h).ok_or_else(|| too_large(header))?;
    let mut pixels = vec![Pixel::default(); pixel_count];
    let bpp = header.bytes_per_pixel();

    for (disk_row, src) in pixel_data.chunks_exact(stride).enumerate() {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        // Files store the bottom row first
        let row = h - 1 - disk_row;
        let dst = &mut pixels[row * w..(row + 1) * w];
        for (out, bgr) in dst.iter_mut().zip(src.chunks_exact(bpp)) {
            *out = Pixel::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    PixelGrid::new(w, h, pixels)
}

fn too_large(header: &BmpHeader) -> BitmapError {
    BitmapError::DimensionsTooLarge {
        width: u64::from(header.width),
        height: u64::from(header.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    /// Hand-built BMP, bottom row first, with an explicit declared size.
    fn raw_bmp(width: i32, height: i32, bpp: u16, rows_bottom_up: &[&[u8]], declared: Option<u32>) -> Vec<u8> {
        let body: Vec<u8> = rows_bottom_up.iter().flat_map(|r| r.iter().copied()).collect();
        let size = declared.unwrap_or(54 + body.len() as u32);
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bpp.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(&body);
        out
    }

    fn decode(data: &[u8]) -> Result<PixelGrid, BitmapError> {
        let header = parse_bmp_header(data)?;
        decode_bmp_pixels(data, &header, &Unstoppable)
    }

    #[test]
    fn rows_flip_and_channels_swap() {
        // 1x2: bottom row blue, top row red; 3 bytes + 1 padding per row
        let data = raw_bmp(1, 2, 24, &[&[255, 0, 0, 0], &[0, 0, 255, 0]], None);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.pixel(0, 0), Pixel::new(255, 0, 0));
        assert_eq!(grid.pixel(1, 0), Pixel::new(0, 0, 255));
    }

    #[test]
    fn padding_is_skipped() {
        // width 3 => 9 bytes + 3 padding
        let row = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0xEE, 0xEE, 0xEE];
        let data = raw_bmp(3, 1, 24, &[&row], None);
        let grid = decode(&data).unwrap();
        assert_eq!(
            grid.pixels(),
            &[Pixel::new(3, 2, 1), Pixel::new(6, 5, 4), Pixel::new(9, 8, 7)]
        );
    }

    #[test]
    fn thirty_two_bit_ignores_fourth_byte() {
        let data = raw_bmp(2, 1, 32, &[&[10, 20, 30, 99, 40, 50, 60, 99]], None);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.pixels(), &[Pixel::new(30, 20, 10), Pixel::new(60, 50, 40)]);
    }

    #[test]
    fn declared_size_mismatch_rejected() {
        let data = raw_bmp(1, 1, 24, &[&[0, 0, 0, 0]], Some(57));
        assert!(matches!(
            decode(&data),
            Err(BitmapError::SizeMismatch {
                declared: 57,
                expected: 58
            })
        ));
    }

    #[test]
    fn truncated_pixel_data_rejected() {
        let mut data = raw_bmp(2, 2, 24, &[&[0; 8], &[0; 8]], None);
        data.truncate(data.len() - 1);
        assert!(matches!(decode(&data), Err(BitmapError::UnexpectedEof)));
    }

    #[test]
    fn bad_magic_rejected() {
        let mut data = raw_bmp(1, 1, 24, &[&[0; 4]], None);
        data[0] = b'X';
        assert!(matches!(decode(&data), Err(BitmapError::UnrecognizedFormat)));
    }

    #[test]
    fn unsupported_depths_rejected() {
        let data = raw_bmp(4, 1, 8, &[&[0; 4]], None);
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn top_down_height_rejected() {
        let data = raw_bmp(1, -1, 24, &[&[0; 4]], None);
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn short_input_is_eof() {
        assert!(matches!(
            parse_bmp_header(b"BM\x00\x00"),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    /// Rewrite a 32-bit `raw_bmp` as BI_BITFIELDS with a mask table after the info header.
    fn with_bitfields(mut data: Vec<u8>, masks: &[u32]) -> Vec<u8> {
        let table: Vec<u8> = masks.iter().flat_map(|m| m.to_le_bytes()).collect();
        let offset = 54 + table.len() as u32;
        let size = data.len() as u32 + table.len() as u32;
        data.splice(54..54, table);
        data[2..6].copy_from_slice(&size.to_le_bytes());
        data[10..14].copy_from_slice(&offset.to_le_bytes());
        data[30..34].copy_from_slice(&3u32.to_le_bytes());
        data
    }

    #[test]
    fn oversized_info_header_rejected() {
        for info_size in [u32::MAX - 1, u32::MAX, u32::MAX - 13] {
            let mut data = raw_bmp(1, 1, 24, &[&[0; 4]], None);
            data[14..18].copy_from_slice(&info_size.to_le_bytes());
            assert!(
                matches!(parse_bmp_header(&data), Err(BitmapError::InvalidHeader(_))),
                "info_size {info_size:#x}"
            );
        }
    }

    #[test]
    fn standard_bitfields_decode_like_bi_rgb() {
        let row: &[u8] = &[10, 20, 30, 0xFF, 40, 50, 60, 0x80];
        let plain = decode(&raw_bmp(2, 1, 32, &[row], None)).unwrap();
        for masks in [
            &[0x00FF_0000, 0x0000_FF00, 0x0000_00FF][..],
            &[0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000][..],
        ] {
            let data = with_bitfields(raw_bmp(2, 1, 32, &[row], None), masks);
            assert_eq!(decode(&data).unwrap(), plain);
        }
    }

    #[test]
    fn other_bitfields_rejected() {
        // RGBX order
        let data = with_bitfields(
            raw_bmp(1, 1, 32, &[&[0; 4]], None),
            &[0x0000_00FF, 0x0000_FF00, 0x00FF_0000],
        );
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::UnsupportedVariant(_))
        ));
        // bitfields at 24 bpp
        let mut data = raw_bmp(1, 1, 24, &[&[0; 4]], None);
        data[30..34].copy_from_slice(&3u32.to_le_bytes());
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::UnsupportedVariant(_))
        ));
        // RLE8
        let mut data = raw_bmp(1, 1, 24, &[&[0; 4]], None);
        data[30..34].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn bitfields_masks_overlapping_pixels_rejected() {
        let mut data = with_bitfields(
            raw_bmp(1, 1, 32, &[&[0; 4]], None),
            &[0x00FF_0000, 0x0000_FF00, 0x0000_00FF],
        );
        data[10..14].copy_from_slice(&54u32.to_le_bytes());
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BitmapError::InvalidHeader(_))
        ));
    }
}
