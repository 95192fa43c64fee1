use crate::base::{Field, Grid};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Holds the domain integrals used by the convergence check of the damage field
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Norms {
    /// ∫ (c - c_old)² dV
    pub crack_err_norm: f64,

    /// ∫ c² dV
    pub c_new_norm: f64,
}

impl Norms {
    /// Returns the relative error `crack_err_norm / c_new_norm`
    ///
    /// If `c_new_norm` is zero, returns zero when `crack_err_norm` is zero and +∞ otherwise.
    pub fn relative_error(&self) -> f64 {
        if self.c_new_norm > 0.0 {
            self.crack_err_norm / self.c_new_norm
        } else if self.crack_err_norm == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    }
}

/// Integrates the convergence norms over the valid cells (parallel reduction over rows)
pub fn integrate_norms(c: &Field<f64>, c_old: &Field<f64>, grid: &Grid) -> Norms {
    let [nx, ny] = c.n_valid();
    let volume = grid.cell_volume();
    (0..ny as isize)
        .into_par_iter()
        .map(|j| {
            let mut row = Norms::default();
            for i in 0..nx as isize {
                let cn = c.get(i, j, 0);
                let diff = cn - c_old.get(i, j, 0);
                row.crack_err_norm += diff * diff * volume;
                row.c_new_norm += cn * cn * volume;
            }
            row
        })
        .reduce(Norms::default, |a, b| Norms {
            crack_err_norm: a.crack_err_norm + b.crack_err_norm,
            c_new_norm: a.c_new_norm + b.c_new_norm,
        })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{integrate_norms, Norms};
    use crate::base::{Field, Grid, ParamGrid};
    use russell_lab::approx_eq;

    #[test]
    fn relative_error_handles_zero_norm() {
        let norms = Norms {
            crack_err_norm: 1.0,
            c_new_norm: 4.0,
        };
        assert_eq!(norms.relative_error(), 0.25);
        assert_eq!(Norms::default().relative_error(), 0.0);
        let norms = Norms {
            crack_err_norm: 1.0,
            c_new_norm: 0.0,
        };
        assert_eq!(norms.relative_error(), f64::INFINITY);
    }

    #[test]
    fn integrate_norms_works() {
        let grid = Grid::new(&ParamGrid {
            n_cell: [4, 2],
            prob_lo: [0.0, 0.0],
            prob_hi: [2.0, 2.0],
        })
        .unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, 3);
        let mut c_old = Field::<f64>::new_cell(&grid, 1, 3);
        c.fill(0.5);
        c_old.fill(1.0);
        c.set(-1, 0, 0, 100.0); // ghosts are ignored
        let norms = integrate_norms(&c, &c_old, &grid);
        // 8 cells of volume 0.5
        approx_eq(norms.crack_err_norm, 8.0 * 0.25 * 0.5, 1e-15);
        approx_eq(norms.c_new_norm, 8.0 * 0.25 * 0.5, 1e-15);
    }
}
