use glam::DVec2;
use swarmfield_params::GridSpec;

use crate::error::{EngineError, Result};
use crate::sparse::{CsrBuilder, CsrMatrix};

/// Tolerance for checking that the domain divides evenly into cells of
/// size `h`.
const CELL_COUNT_TOL: f64 = 1e-8;

/// Margin kept inside the upper domain bound by `Grid::clip`, so a clipped
/// position never lands exactly on the boundary.
const CLIP_BORDER: f64 = 1e-5;

/// Immutable 2D mesh over a rectangular domain. Index `(i, j) -> i + j*mx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub x_lo: f64,
    pub x_hi: f64,
    pub y_lo: f64,
    pub y_hi: f64,
    pub h: f64,
    pub mx: usize,
    pub my: usize,
}

impl Grid {
    pub fn new(spec: GridSpec) -> Result<Self> {
        let GridSpec {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
            h,
        } = spec;

        let mx_f = (x_hi - x_lo) / h;
        let my_f = (y_hi - y_lo) / h;
        if (mx_f.round() - mx_f).abs() >= CELL_COUNT_TOL {
            return Err(EngineError::GridMisconfigured(x_hi - x_lo, h, mx_f));
        }
        if (my_f.round() - my_f).abs() >= CELL_COUNT_TOL {
            return Err(EngineError::GridMisconfigured(y_hi - y_lo, h, my_f));
        }

        let mx = mx_f.round() as usize + 1;
        let my = my_f.round() as usize + 1;
        if mx < 8 || my < 8 {
            log::warn!("grid resolution below 8 cells per axis ({mx}x{my}); diffusion will be very coarse.");
        }

        Ok(Self {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
            h,
            mx,
            my,
        })
    }

    /// Total cell count `N = mx * my`.
    pub fn n(&self) -> usize {
        self.mx * self.my
    }

    /// Maps a real position to its linear cell index. Cells in the top row
    /// (`[mx*(my-1), N)`) are rejected as out of bounds.
    pub fn pos_to_index(&self, x: f64, y: f64) -> Result<usize> {
        let i = ((x - self.x_lo) / (self.x_hi - self.x_lo) * (self.mx as f64 - 1.0)).floor();
        let j = ((y - self.y_lo) / (self.y_hi - self.y_lo) * (self.my as f64 - 1.0)).floor();
        let idx = i + j * self.mx as f64;

        let upper = if self.my == 0 {
            0.0
        } else {
            (self.mx * (self.my - 1)) as f64
        };
        if idx < 0.0 || idx >= upper {
            return Err(EngineError::OutOfBounds { x, y });
        }
        Ok(idx as usize)
    }

    pub fn pos_to_index_vec(&self, pos: DVec2) -> Result<usize> {
        self.pos_to_index(pos.x as f64, pos.y as f64)
    }

    /// Returns the largest same-direction displacement from `pos` that keeps
    /// `pos + d'` inside `[x_lo, x_hi - eps) x [y_lo, y_hi - eps)`, scaling
    /// axis by axis (y uses the already x-scaled vector).
    pub fn clip(&self, pos: DVec2, d: DVec2) -> DVec2 {
        let mut d = d;

        if d.x != 0.0 {
            let npos_x = pos.x + d.x;
            if npos_x < self.x_lo {
                d *= -(pos.x - self.x_lo) / d.x;
            } else if npos_x >= self.x_hi {
                d *= (self.x_hi - pos.x - CLIP_BORDER) / d.x;
            }
        }

        if d.y != 0.0 {
            let npos_y = pos.y + d.y;
            if npos_y < self.y_lo {
                d *= -(pos.y - self.y_lo) / d.y;
            } else if npos_y >= self.y_hi {
                d *= (self.y_hi - pos.y - CLIP_BORDER) / d.y;
            }
        }

        d
    }

    /// Assembles the sparse `N x N` five-point Laplacian, `[-4, +1, +1, +1,
    /// +1]` on center/E/W/N/S, scaled by `1/h^2`. Horizontal wraparound is
    /// suppressed: the E coefficient is dropped on the right edge of each
    /// row and the W coefficient is dropped on the left edge.
    pub fn five_point_laplacian(&self) -> CsrMatrix {
        let n = self.n();
        let mx = self.mx;
        let mut builder = CsrBuilder::new(n);

        for p in 0..n {
            let mut row: Vec<(usize, f64)> = Vec::with_capacity(5);

            if p >= mx {
                row.push((p - mx, 1.0)); // S
            }
            if p % mx != 0 {
                row.push((p - 1, 1.0)); // W
            }
            row.push((p, -4.0)); // center
            if p % mx != mx - 1 {
                row.push((p + 1, 1.0)); // E
            }
            if p + mx < n {
                row.push((p + mx, 1.0)); // N
            }

            row.sort_by_key(|&(col, _)| col);
            builder.push_row(&row);
        }

        let mut a = builder.build();
        a.scale(1.0 / (self.h * self.h));
        a
    }
}
