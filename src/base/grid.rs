use super::ParamGrid;
use crate::StrError;

/// Holds the geometry of a uniform structured 2D grid
///
/// Cells are indexed by `(i, j)` with `0 ≤ i < nx` and `0 ≤ j < ny`.
/// Nodes (cell corners) are indexed by `(i, j)` with `0 ≤ i ≤ nx` and `0 ≤ j ≤ ny`.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    /// Number of cells along x
    pub nx: usize,

    /// Number of cells along y
    pub ny: usize,

    /// Cell size along x
    pub dx: f64,

    /// Cell size along y
    pub dy: f64,

    /// Lower corner
    pub lo: [f64; 2],

    /// Upper corner
    pub hi: [f64; 2],
}

impl Grid {
    /// Allocates a new instance
    pub fn new(param: &ParamGrid) -> Result<Self, StrError> {
        let [nx, ny] = param.n_cell;
        if nx < 1 || ny < 1 {
            return Err("the number of cells must be ≥ 1 along each direction");
        }
        let lx = param.prob_hi[0] - param.prob_lo[0];
        let ly = param.prob_hi[1] - param.prob_lo[1];
        if !(lx > 0.0 && ly > 0.0) {
            return Err("prob_hi must be greater than prob_lo along each direction");
        }
        Ok(Grid {
            nx,
            ny,
            dx: lx / (nx as f64),
            dy: ly / (ny as f64),
            lo: param.prob_lo,
            hi: param.prob_hi,
        })
    }

    /// Returns the number of cells
    #[inline]
    pub fn n_cell(&self) -> usize {
        self.nx * self.ny
    }

    /// Returns the number of nodes
    #[inline]
    pub fn n_node(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }

    /// Returns the coordinates of the center of cell (i, j); ghost indices are allowed
    #[inline]
    pub fn cell_center(&self, i: isize, j: isize) -> [f64; 2] {
        [
            self.lo[0] + (i as f64 + 0.5) * self.dx,
            self.lo[1] + (j as f64 + 0.5) * self.dy,
        ]
    }

    /// Returns the coordinates of node (i, j)
    #[inline]
    pub fn node_coords(&self, i: isize, j: isize) -> [f64; 2] {
        [self.lo[0] + (i as f64) * self.dx, self.lo[1] + (j as f64) * self.dy]
    }

    /// Returns the cell volume (area)
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        self.dx * self.dy
    }

    /// Returns the length of the cell diagonal ‖Δx‖
    #[inline]
    pub fn diagonal(&self) -> f64 {
        f64::sqrt(self.dx * self.dx + self.dy * self.dy)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
