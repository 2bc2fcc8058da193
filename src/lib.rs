//! # zenbmpfilter
//!
//! Uncompressed 24-bit BMP decoder/encoder plus a small library of pixel
//! filters (vignette, clarendon, grayscale, rotations, enlarge, high
//! contrast, lighten, darken, posterize).
//!
//! ## Data flow
//!
//! file bytes → [`decode_bmp`] → [`PixelGrid`] → [`Filter::apply`] →
//! [`PixelGrid`] → [`encode_bmp`] → file bytes
//!
//! Grids are top row first. The BMP layer handles the bottom-up row order,
//! BGR byte order, and 4-byte row padding of the file format.
//!
//! ## Channel arithmetic
//!
//! Filters use integer means and truncate scaled values toward zero. They do
//! not clamp: a result outside 0..=255 keeps its low 8 bits, the same byte an
//! 8-bit store of the integer would hold.
//!
//! ## Non-Goals
//!
//! - Compressed BMPs (RLE, non-standard bitfields), palettes, bit depths
//!   other than 24 (32-bit input, BI_RGB or BI_BITFIELDS with BGRA masks, is
//!   read with its fourth byte ignored)
//! - Any other image format
//! - Interactive prompting and filename handling
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpfilter::{Filter, read_image, write_image};
//!
//! let image = read_image("input.bmp");
//! if image.is_empty() {
//!     eprintln!("not a valid 24-bit bitmap");
//!     return;
//! }
//! let filter = Filter::Clarendon { scale: 0.7 };
//! filter.validate().expect("scale in range");
//! let out = filter.apply(&image);
//! assert!(write_image("output.bmp", &out));
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod decode;
mod error;
mod info;
mod io;
mod limits;
mod pixel;

pub mod filter;

// Re-exports
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use filter::Filter;
pub use info::ImageInfo;
pub use io::{decode_file, encode_file, process_file, read_image, write_image};
pub use limits::Limits;
pub use pixel::{Pixel, PixelGrid};

/// Decode BMP bytes into a top-down [`PixelGrid`].
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BitmapError> {
    bmp::decode(data, None, &stop)
}

/// Encode a [`PixelGrid`] as an uncompressed 24-bit BMP.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(grid, &stop)
}
