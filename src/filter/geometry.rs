//! Quarter-turn rotations and nearest-neighbor enlarge.

use crate::pixel::PixelGrid;

/// Rotate 90 degrees clockwise. Output is `height` wide and `width` tall.
pub fn rotate_90(grid: &PixelGrid) -> PixelGrid {
    let h = grid.height();
    PixelGrid::from_fn(h, grid.width(), |row, col| grid.pixel(h - 1 - col, row))
}

/// Rotate 180 degrees.
pub fn rotate_180(grid: &PixelGrid) -> PixelGrid {
    let (w, h) = (grid.width(), grid.height());
    PixelGrid::from_fn(w, h, |row, col| grid.pixel(h - 1 - row, w - 1 - col))
}

/// The 270-degree step of [`rotate_quarter_turns`].
///
/// Output `(row, col)` takes input `(col, row)`: a transpose, equal to a
/// counter-clockwise quarter turn followed by a vertical flip.
pub fn rotate_270(grid: &PixelGrid) -> PixelGrid {
    PixelGrid::from_fn(grid.height(), grid.width(), |row, col| grid.pixel(col, row))
}

/// Rotate clockwise by `turns` quarter turns. Negative counts rotate the
/// other way; any count is reduced modulo four.
pub fn rotate_quarter_turns(grid: &PixelGrid, turns: i32) -> PixelGrid {
    let angle = i64::from(turns) * 90;
    match angle.rem_euclid(360) {
        0 => grid.clone(),
        90 => rotate_90(grid),
        180 => rotate_180(grid),
        270 => rotate_270(grid),
        other => {
            log::warn!("rotation angle {other} is not a multiple of 90 degrees, image unchanged");
            grid.clone()
        }
    }
}

/// Nearest-neighbor upscale: each source pixel becomes an
/// `x_scale` x `y_scale` block.
pub fn enlarge(grid: &PixelGrid, x_scale: u32, y_scale: u32) -> PixelGrid {
    let (xs, ys) = (x_scale as usize, y_scale as usize);
    PixelGrid::from_fn(grid.width() * xs, grid.height() * ys, |row, col| {
        grid.pixel(row / ys, col / xs)
    })
}
