//! Finite-difference operators on structured-grid fields

use super::{Field, Grid};

/// Computes the centered gradient of a cell-centered component at cell (i, j)
///
/// Requires at least one ghost layer when (i, j) touches the boundary.
#[inline]
pub fn gradient(f: &Field<f64>, comp: usize, grid: &Grid, i: isize, j: isize) -> [f64; 2] {
    [
        (f.get(i + 1, j, comp) - f.get(i - 1, j, comp)) / (2.0 * grid.dx),
        (f.get(i, j + 1, comp) - f.get(i, j - 1, comp)) / (2.0 * grid.dy),
    ]
}

/// Computes the five-point Laplacian of a cell-centered component at cell (i, j)
#[inline]
pub fn laplacian(f: &Field<f64>, comp: usize, grid: &Grid, i: isize, j: isize) -> f64 {
    let fc = f.get(i, j, comp);
    (f.get(i + 1, j, comp) - 2.0 * fc + f.get(i - 1, j, comp)) / (grid.dx * grid.dx)
        + (f.get(i, j + 1, comp) - 2.0 * fc + f.get(i, j - 1, comp)) / (grid.dy * grid.dy)
}

/// Averages the four corner values of a node-centered component onto cell (i, j)
#[inline]
pub fn node_to_cell_average(f: &Field<f64>, comp: usize, i: isize, j: isize) -> f64 {
    0.25 * (f.get(i, j, comp) + f.get(i + 1, j, comp) + f.get(i, j + 1, comp) + f.get(i + 1, j + 1, comp))
}

/// Computes the gradient of a node-centered component at node (i, j)
///
/// Uses centered differences in the interior and one-sided differences on the boundary
/// nodes, thus no ghost values are read.
#[inline]
pub fn nodal_gradient(f: &Field<f64>, comp: usize, grid: &Grid, i: isize, j: isize) -> [f64; 2] {
    let [nx, ny] = f.n_valid();
    let diff = |lo: (isize, isize), hi: (isize, isize), h: f64| (f.get(hi.0, hi.1, comp) - f.get(lo.0, lo.1, comp)) / h;
    let gx = if i == 0 {
        diff((i, j), (i + 1, j), grid.dx)
    } else if i == nx as isize - 1 {
        diff((i - 1, j), (i, j), grid.dx)
    } else {
        diff((i - 1, j), (i + 1, j), 2.0 * grid.dx)
    };
    let gy = if j == 0 {
        diff((i, j), (i, j + 1), grid.dy)
    } else if j == ny as isize - 1 {
        diff((i, j - 1), (i, j), grid.dy)
    } else {
        diff((i, j - 1), (i, j + 1), 2.0 * grid.dy)
    };
    [gx, gy]
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{gradient, laplacian, nodal_gradient, node_to_cell_average};
    use crate::base::{Field, GhostBc, Grid, ParamGrid};
    use russell_lab::approx_eq;

    fn grid() -> Grid {
        Grid::new(&ParamGrid {
            n_cell: [4, 4],
            prob_lo: [0.0, 0.0],
            prob_hi: [2.0, 1.0],
        })
        .unwrap()
    }

    #[test]
    fn gradient_and_laplacian_work() {
        let g = grid();
        let mut f = Field::<f64>::new_cell(&g, 1, 1);
        // f = x² + 3y
        f.par_for_each_mut(1, |i, j, v| {
            let [x, y] = g.cell_center(i, j);
            v[0] = x * x + 3.0 * y;
        });
        let [x, _] = g.cell_center(1, 2);
        let gr = gradient(&f, 0, &g, 1, 2);
        approx_eq(gr[0], 2.0 * x, 1e-14);
        approx_eq(gr[1], 3.0, 1e-14);
        approx_eq(laplacian(&f, 0, &g, 1, 2), 2.0, 1e-12);

        // reflected ghosts give a zero normal gradient at the boundary cell
        let mut h = Field::<f64>::new_cell(&g, 1, 1);
        h.fill(1.0);
        h.fill_boundary([GhostBc::Neumann, GhostBc::Neumann]);
        assert_eq!(gradient(&h, 0, &g, 0, 0), [0.0, 0.0]);
        assert_eq!(laplacian(&h, 0, &g, 0, 0), 0.0);
    }

    #[test]
    fn node_operators_work() {
        let g = grid();
        let mut u = Field::<f64>::new_node(&g, 2, 0);
        // u = (2x + y, -x)
        u.par_for_each_mut(0, |i, j, v| {
            let [x, y] = g.node_coords(i, j);
            v[0] = 2.0 * x + y;
            v[1] = -x;
        });
        for (i, j) in [(0, 0), (2, 3), (4, 4), (4, 0)] {
            let g0 = nodal_gradient(&u, 0, &g, i, j);
            let g1 = nodal_gradient(&u, 1, &g, i, j);
            approx_eq(g0[0], 2.0, 1e-14);
            approx_eq(g0[1], 1.0, 1e-14);
            approx_eq(g1[0], -1.0, 1e-14);
            approx_eq(g1[1], 0.0, 1e-14);
        }
        let [x, y] = g.cell_center(1, 1);
        approx_eq(node_to_cell_average(&u, 0, 1, 1), 2.0 * x + y, 1e-14);
    }
}
