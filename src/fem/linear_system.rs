use super::{ElasticBcs, ElementQ4, Equations, Face};
use crate::base::{BcType, Field, Grid, NDIM};
use crate::material::IsotropicElastic;
use crate::StrError;
use rayon::prelude::*;
use russell_lab::{Matrix, Vector};
use russell_sparse::{SparseMatrix, Sym};

/// Holds the global linear system of the elasticity problem
///
/// Prescribed equations are eliminated: their rows and columns are replaced by a unit diagonal
/// and the corresponding terms K·ū are moved to the right-hand side. Thus the matrix stays symmetric.
pub struct LinearSystem {
    /// Total number of global equations
    pub n_equation: usize,

    /// Supremum of the number of nonzero values in the global matrix
    ///
    /// Equals `n_cell × 8 × 8 + n_prescribed` (duplicates are summed by the COO format).
    pub nnz_sup: usize,

    /// Global stiffness matrix K (with eliminated prescribed equations)
    pub kk: SparseMatrix,

    /// Right-hand side vector
    pub rhs: Vector,

    /// Diagonal of K (for the Jacobi preconditioner)
    pub diag: Vector,

    /// External nodal forces indexed by node (body force and tractions)
    pub ff_ext_node: Vec<[f64; NDIM]>,

    /// Local stiffness matrices (one per cell; cells numbered row by row)
    pub kk_local: Vec<Matrix>,
}

impl LinearSystem {
    /// Allocates a new instance
    pub fn new(grid: &Grid, equations: &Equations) -> Result<Self, StrError> {
        let n_equation = equations.n_equation;
        let nnz_sup = grid.n_cell() * 64 + equations.n_prescribed();
        Ok(LinearSystem {
            n_equation,
            nnz_sup,
            kk: SparseMatrix::new_coo(n_equation, n_equation, nnz_sup, Sym::No)?,
            rhs: Vector::new(n_equation),
            diag: Vector::new(n_equation),
            ff_ext_node: vec![[0.0; NDIM]; grid.n_node()],
            kk_local: (0..grid.n_cell()).map(|_| Matrix::new(8, 8)).collect(),
        })
    }

    /// Computes the local stiffness matrices (in parallel) and assembles the global system
    pub fn assemble(
        &mut self,
        grid: &Grid,
        equations: &Equations,
        model: &Field<IsotropicElastic>,
        bcs: &ElasticBcs,
        body_force: [f64; NDIM],
    ) -> Result<(), StrError> {
        let nx = grid.nx;
        let element = ElementQ4::new(grid.dx, grid.dy);

        // local matrices
        self.kk_local.par_iter_mut().enumerate().for_each(|(e, kk)| {
            let (i, j) = ((e % nx) as isize, (e / nx) as isize);
            let models = [
                model.get(i, j, 0),
                model.get(i + 1, j, 0),
                model.get(i + 1, j + 1, 0),
                model.get(i, j + 1, 0),
            ];
            element.stiffness(kk, &models);
        });

        // external forces
        self.calc_external_forces(grid, equations, bcs, body_force, &element);
        self.rhs.fill(0.0);
        for (node, f) in self.ff_ext_node.iter().enumerate() {
            let (i, j) = (node % (nx + 1), node / (nx + 1));
            for comp in 0..NDIM {
                self.rhs[equations.eq(i, j, comp)] += f[comp];
            }
        }

        // global matrix
        self.kk = SparseMatrix::new_coo(self.n_equation, self.n_equation, self.nnz_sup, Sym::No)?;
        self.diag.fill(0.0);
        let prescribed = &equations.prescribed;
        for (e, kk) in self.kk_local.iter().enumerate() {
            let l2g = equations.local_to_global(e % nx, e / nx);
            for l in 0..8 {
                let g = l2g[l];
                if prescribed[g] {
                    continue;
                }
                for ll in 0..8 {
                    let gg = l2g[ll];
                    let k = kk.get(l, ll);
                    if prescribed[gg] {
                        self.rhs[g] -= k * equations.values[gg];
                    } else {
                        self.kk.put(g, gg, k)?;
                        if g == gg {
                            self.diag[g] += k;
                        }
                    }
                }
            }
        }
        for eq in 0..self.n_equation {
            if prescribed[eq] {
                self.kk.put(eq, eq, 1.0)?;
                self.diag[eq] = 1.0;
                self.rhs[eq] = equations.values[eq];
            }
        }
        Ok(())
    }

    /// Calculates the external nodal forces due to the body force and the prescribed tractions
    fn calc_external_forces(
        &mut self,
        grid: &Grid,
        equations: &Equations,
        bcs: &ElasticBcs,
        body_force: [f64; NDIM],
        element: &ElementQ4,
    ) {
        let nnx = grid.nx + 1;
        self.ff_ext_node.iter_mut().for_each(|f| *f = [0.0; NDIM]);
        if body_force[0] != 0.0 || body_force[1] != 0.0 {
            let mut ff = Vector::new(8);
            element.body_force(&mut ff, body_force);
            for j in 0..grid.ny {
                for i in 0..grid.nx {
                    let nodes = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
                    for (m, (a, b)) in nodes.iter().enumerate() {
                        for comp in 0..NDIM {
                            self.ff_ext_node[b * nnx + a][comp] += ff[2 * m + comp];
                        }
                    }
                }
            }
        }
        for face in Face::ALL {
            let h = match face {
                Face::Xlo | Face::Xhi => grid.dy,
                Face::Ylo | Face::Yhi => grid.dx,
            };
            let nodes = equations.face_nodes(face);
            for comp in 0..NDIM {
                if bcs.get_type(face, comp) != BcType::Traction {
                    continue;
                }
                let t = bcs.get_value(face, comp);
                for pair in nodes.windows(2) {
                    for (a, b) in pair {
                        self.ff_ext_node[b * nnx + a][comp] += 0.5 * t * h;
                    }
                }
            }
        }
    }

    /// Calculates the internal nodal forces K·u (unconstrained) indexed by node
    pub fn internal_forces(&self, grid: &Grid, disp: &Field<f64>) -> Vec<[f64; NDIM]> {
        let nnx = grid.nx + 1;
        let mut ff_int = vec![[0.0; NDIM]; grid.n_node()];
        for (e, kk) in self.kk_local.iter().enumerate() {
            let (i, j) = (e % grid.nx, e / grid.nx);
            let nodes = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
            let mut uu = [0.0; 8];
            for (m, (a, b)) in nodes.iter().enumerate() {
                for comp in 0..NDIM {
                    uu[2 * m + comp] = disp.get(*a as isize, *b as isize, comp);
                }
            }
            for (m, (a, b)) in nodes.iter().enumerate() {
                for comp in 0..NDIM {
                    let l = 2 * m + comp;
                    let f: f64 = (0..8).map(|ll| kk.get(l, ll) * uu[ll]).sum();
                    ff_int[b * nnx + a][comp] += f;
                }
            }
        }
        ff_int
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
