use crate::material::IsotropicElastic;
use russell_lab::{Matrix, Vector};

/// Natural coordinates ξ of the nodes of the bilinear quadrilateral
const XI_NODE: [f64; 4] = [-1.0, 1.0, 1.0, -1.0];

/// Natural coordinates η of the nodes of the bilinear quadrilateral
const ETA_NODE: [f64; 4] = [-1.0, -1.0, 1.0, 1.0];

/// Returns the 2 × 2 Gauss points (natural coordinates; unit weights)
#[inline]
fn gauss_points() -> [(f64, f64); 4] {
    let a = 1.0 / f64::sqrt(3.0);
    [(-a, -a), (a, -a), (a, a), (-a, a)]
}

/// Implements a bilinear quadrilateral (Q4) for plane-strain elasticity on a rectangular cell
///
/// Local node order: 0 = (i, j), 1 = (i+1, j), 2 = (i+1, j+1), 3 = (i, j+1).
/// Local equations: `[u0x, u0y, u1x, u1y, u2x, u2y, u3x, u3y]`.
pub struct ElementQ4 {
    /// Cell size along x
    dx: f64,

    /// Cell size along y
    dy: f64,
}

impl ElementQ4 {
    /// Allocates a new instance
    pub fn new(dx: f64, dy: f64) -> Self {
        ElementQ4 { dx, dy }
    }

    /// Returns the shape functions at (ξ, η)
    #[inline]
    pub fn shape(&self, xi: f64, eta: f64) -> [f64; 4] {
        let mut nn = [0.0; 4];
        for m in 0..4 {
            nn[m] = 0.25 * (1.0 + XI_NODE[m] * xi) * (1.0 + ETA_NODE[m] * eta);
        }
        nn
    }

    /// Returns the Cartesian derivatives of the shape functions at (ξ, η)
    #[inline]
    pub fn gradients(&self, xi: f64, eta: f64) -> [[f64; 2]; 4] {
        let mut gg = [[0.0; 2]; 4];
        for m in 0..4 {
            gg[m][0] = 0.25 * XI_NODE[m] * (1.0 + ETA_NODE[m] * eta) * 2.0 / self.dx;
            gg[m][1] = 0.25 * ETA_NODE[m] * (1.0 + XI_NODE[m] * xi) * 2.0 / self.dy;
        }
        gg
    }

    /// Returns the determinant of the Jacobian of the isoparametric mapping
    #[inline]
    pub fn det_jac(&self) -> f64 {
        0.25 * self.dx * self.dy
    }

    /// Calculates the stiffness matrix
    ///
    /// The Lamé parameters are interpolated to the integration points from the nodal models.
    pub fn stiffness(&self, kk: &mut Matrix, models: &[IsotropicElastic; 4]) {
        kk.fill(0.0);
        let det_jac = self.det_jac();
        for (xi, eta) in gauss_points() {
            let nn = self.shape(xi, eta);
            let gg = self.gradients(xi, eta);
            let mut lambda = 0.0;
            let mut mu = 0.0;
            for m in 0..4 {
                lambda += nn[m] * models[m].lambda;
                mu += nn[m] * models[m].mu;
            }
            let l2m = lambda + 2.0 * mu;
            for a in 0..4 {
                let (ax, ay) = (gg[a][0], gg[a][1]);
                for b in 0..4 {
                    let (bx, by) = (gg[b][0], gg[b][1]);
                    kk.add(2 * a, 2 * b, (l2m * ax * bx + mu * ay * by) * det_jac);
                    kk.add(2 * a, 2 * b + 1, (lambda * ax * by + mu * ay * bx) * det_jac);
                    kk.add(2 * a + 1, 2 * b, (lambda * ay * bx + mu * ax * by) * det_jac);
                    kk.add(2 * a + 1, 2 * b + 1, (l2m * ay * by + mu * ax * bx) * det_jac);
                }
            }
        }
    }

    /// Calculates the consistent nodal forces of a uniform body force
    pub fn body_force(&self, ff: &mut Vector, b: [f64; 2]) {
        ff.fill(0.0);
        let det_jac = self.det_jac();
        for (xi, eta) in gauss_points() {
            let nn = self.shape(xi, eta);
            for m in 0..4 {
                ff[2 * m] += nn[m] * b[0] * det_jac;
                ff[2 * m + 1] += nn[m] * b[1] * det_jac;
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
