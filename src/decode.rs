use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Builder for decoding BMP bytes with optional resource limits.
///
/// ```
/// use zenbmpfilter::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let result = DecodeRequest::new(b"not a bitmap")
///     .with_limits(&limits)
///     .decode(Unstoppable);
/// assert!(result.is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before any pixel allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to a top-down [`PixelGrid`].
    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        bmp::decode(self.data, self.limits, &stop)
    }
}
