//! Pixel filters. Every filter reads its input grid and returns a new one.
//!
//! The functions here do not check their numeric parameters. Orchestrators
//! that take parameters from users should run [`Filter::validate`] first.

mod geometry;
mod tone;

pub use geometry::{enlarge, rotate_90, rotate_180, rotate_270, rotate_quarter_turns};
pub use tone::{clarendon, darken, grayscale, high_contrast, lighten, posterize, vignette};

use core::fmt;
use core::ops::RangeInclusive;

use crate::error::BitmapError;
use crate::pixel::PixelGrid;

/// Accepted rotation counts for [`Filter::RotateQuarterTurns`].
pub const QUARTER_TURN_RANGE: RangeInclusive<i32> = 1..=100;
/// Accepted factors for each axis of [`Filter::Enlarge`].
pub const ENLARGE_RANGE: RangeInclusive<u32> = 2..=5;

/// A filter choice plus its parameters.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    Vignette,
    /// Brighten highlights and darken shadows by `scale` in `(0, 1)`.
    Clarendon { scale: f64 },
    Grayscale,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Clockwise quarter turns.
    RotateQuarterTurns { turns: i32 },
    Enlarge { x_scale: u32, y_scale: u32 },
    HighContrast,
    Lighten { scale: f64 },
    Darken { scale: f64 },
    /// Black, white, red, green, and blue only.
    Posterize,
}

impl Filter {
    /// Run the filter.
    pub fn apply(&self, grid: &PixelGrid) -> PixelGrid {
        log::debug!(
            "applying {self} to {}x{} grid",
            grid.width(),
            grid.height()
        );
        match *self {
            Filter::Vignette => vignette(grid),
            Filter::Clarendon { scale } => clarendon(grid, scale),
            Filter::Grayscale => grayscale(grid),
            Filter::Rotate90 => rotate_90(grid),
            Filter::Rotate180 => rotate_180(grid),
            Filter::Rotate270 => rotate_270(grid),
            Filter::RotateQuarterTurns { turns } => rotate_quarter_turns(grid, turns),
            Filter::Enlarge { x_scale, y_scale } => enlarge(grid, x_scale, y_scale),
            Filter::HighContrast => high_contrast(grid),
            Filter::Lighten { scale } => lighten(grid, scale),
            Filter::Darken { scale } => darken(grid, scale),
            Filter::Posterize => posterize(grid),
        }
    }

    /// Short lowercase name, for logs and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Vignette => "vignette",
            Filter::Clarendon { .. } => "clarendon",
            Filter::Grayscale => "grayscale",
            Filter::Rotate90 => "rotate-90",
            Filter::Rotate180 => "rotate-180",
            Filter::Rotate270 => "rotate-270",
            Filter::RotateQuarterTurns { .. } => "rotate",
            Filter::Enlarge { .. } => "enlarge",
            Filter::HighContrast => "high-contrast",
            Filter::Lighten { .. } => "lighten",
            Filter::Darken { .. } => "darken",
            Filter::Posterize => "posterize",
        }
    }

    /// Check parameters against the ranges user-facing callers accept.
    ///
    /// Scales must lie strictly between 0 and 1, quarter turns in
    /// [`QUARTER_TURN_RANGE`], and enlarge factors in [`ENLARGE_RANGE`].
    pub fn validate(&self) -> Result<(), BitmapError> {
        match *self {
            Filter::Clarendon { scale } | Filter::Lighten { scale } | Filter::Darken { scale } => {
                if !(scale > 0.0 && scale < 1.0) {
                    return Err(BitmapError::InvalidParameter(format!(
                        "{} scale {scale} must be between 0 and 1",
                        self.name()
                    )));
                }
            }
            Filter::RotateQuarterTurns { turns } => {
                if !QUARTER_TURN_RANGE.contains(&turns) {
                    return Err(BitmapError::InvalidParameter(format!(
                        "rotation count {turns} outside {}..={}",
                        QUARTER_TURN_RANGE.start(),
                        QUARTER_TURN_RANGE.end()
                    )));
                }
            }
            Filter::Enlarge { x_scale, y_scale } => {
                for (axis, factor) in [("x", x_scale), ("y", y_scale)] {
                    if !ENLARGE_RANGE.contains(&factor) {
                        return Err(BitmapError::InvalidParameter(format!(
                            "{axis} scale {factor} outside {}..={}",
                            ENLARGE_RANGE.start(),
                            ENLARGE_RANGE.end()
                        )));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Filter::Clarendon { scale } | Filter::Lighten { scale } | Filter::Darken { scale } => {
                write!(f, "{}({scale})", self.name())
            }
            Filter::RotateQuarterTurns { turns } => write!(f, "{}({turns})", self.name()),
            Filter::Enlarge { x_scale, y_scale } => {
                write!(f, "{}({x_scale}x{y_scale})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn apply_dispatches_to_the_named_filter() {
        let grid = PixelGrid::from_fn(3, 2, |row, col| Pixel::new(row as u8 * 90, col as u8 * 60, 30));
        assert_eq!(Filter::Grayscale.apply(&grid), grayscale(&grid));
        assert_eq!(Filter::Rotate90.apply(&grid), rotate_90(&grid));
        assert_eq!(Filter::Rotate270.apply(&grid), rotate_270(&grid));
        assert_eq!(
            Filter::RotateQuarterTurns { turns: 2 }.apply(&grid),
            rotate_180(&grid)
        );
        assert_eq!(
            Filter::Enlarge { x_scale: 2, y_scale: 3 }.apply(&grid),
            enlarge(&grid, 2, 3)
        );
        assert_eq!(
            Filter::Darken { scale: 0.25 }.apply(&grid),
            darken(&grid, 0.25)
        );
    }

    #[test]
    fn scales_must_be_strictly_inside_unit_interval() {
        assert!(Filter::Lighten { scale: 0.5 }.validate().is_ok());
        for scale in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(
                matches!(
                    Filter::Clarendon { scale }.validate(),
                    Err(BitmapError::InvalidParameter(_))
                ),
                "{scale} accepted"
            );
        }
    }

    #[test]
    fn rotation_and_enlarge_ranges() {
        assert!(Filter::RotateQuarterTurns { turns: 1 }.validate().is_ok());
        assert!(Filter::RotateQuarterTurns { turns: 100 }.validate().is_ok());
        assert!(Filter::RotateQuarterTurns { turns: 0 }.validate().is_err());
        assert!(Filter::RotateQuarterTurns { turns: 101 }.validate().is_err());
        assert!(Filter::Enlarge { x_scale: 2, y_scale: 5 }.validate().is_ok());
        assert!(Filter::Enlarge { x_scale: 1, y_scale: 3 }.validate().is_err());
        assert!(Filter::Enlarge { x_scale: 3, y_scale: 6 }.validate().is_err());
        assert!(Filter::Posterize.validate().is_ok());
    }

    #[test]
    fn display_includes_parameters() {
        assert_eq!(Filter::Vignette.to_string(), "vignette");
        assert_eq!(Filter::Darken { scale: 0.25 }.to_string(), "darken(0.25)");
        assert_eq!(
            Filter::Enlarge { x_scale: 2, y_scale: 4 }.to_string(),
            "enlarge(2x4)"
        );
    }
}
