use crate::bmp;
use crate::error::BitmapError;

/// Header-level facts about a BMP, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// 24, or 32 for files carrying an ignored fourth byte.
    pub bits_per_pixel: u16,
    /// Byte offset of the pixel array.
    pub data_offset: u32,
    /// Total size declared in the file header.
    pub declared_file_size: u32,
    /// Whether the declared size agrees with offset + padded rows.
    pub layout_consistent: bool,
}

impl ImageInfo {
    /// Read width, height, and layout from BMP header bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let header = bmp::parse_bmp_header(data)?;
        Ok(Self::from_header(&header))
    }

    fn from_header(header: &bmp::BmpHeader) -> Self {
        Self {
            width: header.width,
            height: header.height,
            bits_per_pixel: header.bits_per_pixel,
            data_offset: header.data_offset,
            declared_file_size: header.file_size,
            layout_consistent: header.check_layout().is_ok(),
        }
    }
}
