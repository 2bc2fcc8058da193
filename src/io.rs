//! File-path entry points.
//!
//! [`read_image`] and [`write_image`] use sentinel results: an empty grid
//! means "not a valid image" and `false` means "could not write". The
//! `*_file` variants report the cause.

use std::fs;
use std::path::Path;

use enough::Unstoppable;

use crate::bmp;
use crate::error::BitmapError;
use crate::filter::Filter;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Read and decode a BMP file.
pub fn decode_file(path: impl AsRef<Path>, limits: Option<&Limits>) -> Result<PixelGrid, BitmapError> {
    let data = fs::read(path.as_ref())?;
    bmp::decode(&data, limits, &Unstoppable)
}

/// Encode `grid` as a 24-bit BMP and write it to `path`.
pub fn encode_file(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<(), BitmapError> {
    let data = bmp::encode(grid, &Unstoppable)?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Decode `path`, returning an empty grid if it is missing, unreadable, or
/// not a supported bitmap.
pub fn read_image(path: impl AsRef<Path>) -> PixelGrid {
    let path = path.as_ref();
    decode_file(path, None).unwrap_or_else(|e| {
        log::warn!("{}: {e}", path.display());
        PixelGrid::empty()
    })
}

/// Write `grid` to `path`. Returns `false` if the file could not be written.
pub fn write_image(path: impl AsRef<Path>, grid: &PixelGrid) -> bool {
    let path = path.as_ref();
    match encode_file(path, grid) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{}: {e}", path.display());
            false
        }
    }
}

/// Decode `src`, apply `filter`, and write the result to `dst`.
///
/// Refuses to overwrite the source and refuses images that decode empty.
/// Filter parameters are not validated here.
pub fn process_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    filter: &Filter,
) -> Result<(), BitmapError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if same_file(src, dst) {
        return Err(BitmapError::InvalidParameter(format!(
            "destination {} is the source image",
            dst.display()
        )));
    }
    let grid = decode_file(src, None)?;
    if grid.is_empty() {
        return Err(BitmapError::EmptyImage);
    }
    let filtered = filter.apply(&grid);
    encode_file(dst, &filtered)?;
    log::debug!("{filter}: {} -> {}", src.display(), dst.display());
    Ok(())
}

/// Whether `dst` names the existing file `src` once `.`, `..`, and symlinks
/// are resolved. Falls back to comparing the paths as given when `src` does
/// not exist.
fn same_file(src: &Path, dst: &Path) -> bool {
    match fs::canonicalize(src) {
        Ok(src_real) => fs::canonicalize(dst).is_ok_and(|dst_real| dst_real == src_real),
        Err(_) => src == dst,
    }
}
