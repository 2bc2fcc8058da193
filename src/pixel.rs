use crate::error::BitmapError;

/// One 8-bit RGB pixel. No alpha channel is modeled.
pub type Pixel = rgb::RGB8;

/// Decoded image data: a row-major grid of [`Pixel`]s, top row first.
///
/// A grid with zero rows or zero columns is *empty*. The path-level decoder
/// returns an empty grid to signal "not a valid/supported image", so callers
/// must check [`PixelGrid::is_empty`] before filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Wrap a row-major pixel buffer. The buffer length must equal `width * height`.
    ///
    /// A zero width or height gives [`PixelGrid::empty`].
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        let expected = width
            .checked_mul(height)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            })?;
        if pixels.len() != expected {
            return Err(BitmapError::InvalidParameter(format!(
                "pixel buffer holds {} pixels, {width}x{height} grid needs {expected}",
                pixels.len()
            )));
        }
        if expected == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The empty grid (zero rows).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A grid where every cell holds `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, BitmapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(BitmapError::InvalidParameter(format!(
                "row {idx} has {} pixels, expected {width}",
                row.len()
            )));
        }
        if width == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            width,
            height,
            pixels: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` when the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(row, col)`. Panics when out of bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Pixel {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.pixels[row * self.width + col]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Pixel]> + DoubleEndedIterator {
        // chunks_exact panics on zero; an empty buffer yields no chunks for any size
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Apply `f` to every pixel, keeping dimensions.
    pub(crate) fn map_pixels(&self, f: impl FnMut(Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    /// Borrow as an [`imgref::ImgRef`]. `None` for an empty grid.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, Pixel>> {
        if self.is_empty() {
            return None;
        }
        Some(imgref::ImgRef::new(&self.pixels, self.width, self.height))
    }
}

#[cfg(feature = "imgref")]
impl From<imgref::ImgVec<Pixel>> for PixelGrid {
    fn from(img: imgref::ImgVec<Pixel>) -> Self {
        let (width, height) = (img.width(), img.height());
        let pixels: Vec<Pixel> = img.as_ref().pixels().collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}
