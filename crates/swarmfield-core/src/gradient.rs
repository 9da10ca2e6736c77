use crate::error::Result;
use crate::grid::Grid;

/// Central-difference gradient of a single species' field row at an
/// arbitrary real position. Returns `(0, 0)` within `h` of either
/// boundary axis rather than reading past the edge of the grid.
pub fn gradient(grid: &Grid, field: &[f64], x: f64, y: f64) -> Result<(f64, f64)> {
    let p = grid.pos_to_index(x, y)?;
    let mx = grid.mx;
    let h = grid.h;

    let gx = if x - grid.x_lo < h || grid.x_hi - x < h {
        0.0
    } else {
        (field[p + 1] - field[p - 1]) / (2.0 * h)
    };

    let gy = if y - grid.y_lo < h || grid.y_hi - y < h {
        0.0
    } else {
        (field[p + mx] - field[p - mx]) / (2.0 * h)
    };

    Ok((gx, gy))
}
