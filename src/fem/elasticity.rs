use super::{solve_bicgstab, solve_pcg, ElasticBcs, ElasticFields, Equations, Face, KrylovParams, KrylovReport, LinearSystem};
use crate::base::{stencil, BottomSolver, Field, Grid, ParamElastic, NDIM};
use crate::material::{degrade_model_field, CrackPotential, IsotropicElastic};
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};
use russell_sparse::{Genie, LinSolver, SparseMatrix};
use russell_tensor::{Mandel, Tensor2};

/// Holds the results of one elastic solve
#[derive(Clone, Copy, Debug)]
pub struct ElasticReport {
    /// Results of the linear solver
    pub linear: KrylovReport,

    /// Euclidean norm of the out-of-balance forces f_ext - f_int at the free equations
    pub norm_residual: f64,

    /// Sum of the y-reactions on the top face
    pub reaction_top: f64,
}

/// Implements the elasticity boundary-value problem with damage-degraded stiffness
pub struct ElasticityProblem {
    /// Grid
    grid: Grid,

    /// Undamaged material
    pristine: IsotropicElastic,

    /// Solver options and boundary conditions
    param: ParamElastic,

    /// Smallest retained stiffness fraction
    modulus_scaling_max: f64,

    /// Boundary conditions (the top y value follows the load ramp)
    pub bcs: ElasticBcs,

    /// Equation numbers
    pub equations: Equations,

    /// Global linear system
    pub system: LinearSystem,

    /// Solution vector (kept as initial guess for the next solve)
    uu: Vector,
}

impl ElasticityProblem {
    /// Allocates a new instance
    pub fn new(
        grid: &Grid,
        pristine: IsotropicElastic,
        param: &ParamElastic,
        modulus_scaling_max: f64,
    ) -> Result<Self, StrError> {
        let bcs = ElasticBcs::new(&param.bc)?;
        let equations = Equations::new(grid, &bcs);
        let system = LinearSystem::new(grid, &equations)?;
        let uu = Vector::new(equations.n_equation);
        Ok(ElasticityProblem {
            grid: *grid,
            pristine,
            param: *param,
            modulus_scaling_max,
            bcs,
            equations,
            system,
            uu,
        })
    }

    /// Solves the elastic equilibrium for the applied top displacement `ramp`
    ///
    /// Resets the material models to the pristine state and degrades them with the damage field `c`
    /// (which must have valid ghost values). The previous pristine energy is kept in `energy_pristine_old`.
    pub fn solve(
        &mut self,
        ramp: f64,
        c: &Field<f64>,
        crack: &dyn CrackPotential,
        fields: &mut ElasticFields,
    ) -> Result<ElasticReport, StrError> {
        // material
        fields.model.fill(self.pristine);
        fields.swap_pristine_energy();
        degrade_model_field(
            &mut fields.model,
            c,
            crack,
            self.modulus_scaling_max,
            self.bcs.ghost_bcs(),
        );

        // boundary conditions and linear system
        self.bcs.set_value(Face::Yhi, 1, ramp);
        self.equations.update_prescribed(&self.bcs);
        self.system.assemble(
            &self.grid,
            &self.equations,
            &fields.model,
            &self.bcs,
            self.param.body_force,
        )?;

        // initial guess
        let (nnx, nny) = (self.grid.nx + 1, self.grid.ny + 1);
        for j in 0..nny {
            for i in 0..nnx {
                for comp in 0..NDIM {
                    let eq = self.equations.eq(i, j, comp);
                    self.uu[eq] = if self.equations.prescribed[eq] {
                        self.equations.values[eq]
                    } else {
                        fields.disp.get(i as isize, j as isize, comp)
                    };
                }
            }
        }

        // solve
        let linear = self.solve_linear_system()?;
        if !linear.converged {
            tracing::warn!(
                iterations = linear.iterations,
                residual = linear.residual_norm,
                "elastic solver did not converge"
            );
        }
        if (0..self.uu.dim()).any(|k| !self.uu[k].is_finite()) {
            tracing::warn!(ramp, "elastic solution contains NaN or Inf");
        }

        // displacement and external forces
        for j in 0..nny {
            for i in 0..nnx {
                for comp in 0..NDIM {
                    let eq = self.equations.eq(i, j, comp);
                    fields.disp.set(i as isize, j as isize, comp, self.uu[eq]);
                    fields.rhs.set(i as isize, j as isize, comp, self.system.ff_ext_node[j * nnx + i][comp]);
                }
            }
        }

        // derived fields
        self.calc_derived_fields(fields);

        // out-of-balance forces and reactions
        let ff_int = self.system.internal_forces(&self.grid, &fields.disp);
        let mut rr = Vector::new(self.equations.n_equation);
        let mut reaction_top = 0.0;
        for j in 0..nny {
            for i in 0..nnx {
                let node = j * nnx + i;
                for comp in 0..NDIM {
                    let eq = self.equations.eq(i, j, comp);
                    let r = self.system.ff_ext_node[node][comp] - ff_int[node][comp];
                    if !self.equations.prescribed[eq] {
                        rr[eq] += r;
                    }
                }
                if j == nny - 1 {
                    reaction_top -= self.system.ff_ext_node[node][1] - ff_int[node][1];
                }
            }
        }
        for j in 0..nny {
            for i in 0..nnx {
                for comp in 0..NDIM {
                    let eq = self.equations.eq(i, j, comp);
                    fields.residual.set(i as isize, j as isize, comp, rr[eq]);
                }
            }
        }
        Ok(ElasticReport {
            linear,
            norm_residual: vec_norm(&rr, Norm::Euc),
            reaction_top,
        })
    }

    /// Solves the assembled linear system with the selected solver
    fn solve_linear_system(&mut self) -> Result<KrylovReport, StrError> {
        let params = KrylovParams {
            tol_rel: self.param.tol_rel,
            tol_abs: self.param.tol_abs,
            max_iter: self.param.max_iter,
            verbose: self.param.verbose,
        };
        let system = &mut self.system;
        match self.param.bottom_solver {
            BottomSolver::Cg => {
                let coo = system.kk.get_coo()?;
                solve_pcg(&mut self.uu, |y, u| coo.mat_vec_mul(y, 1.0, u), &system.diag, &system.rhs, &params)
            }
            BottomSolver::Bicgstab => {
                let coo = system.kk.get_coo()?;
                solve_bicgstab(&mut self.uu, |y, u| coo.mat_vec_mul(y, 1.0, u), &system.diag, &system.rhs, &params)
            }
            BottomSolver::Direct => {
                solve_direct(&mut system.kk, &mut self.uu, &system.rhs, params.verbose)?;
                let mut ku = Vector::new(system.n_equation);
                system.kk.get_coo()?.mat_vec_mul(&mut ku, 1.0, &self.uu)?;
                let residual_norm = f64::sqrt(
                    (0..ku.dim())
                        .map(|k| (system.rhs[k] - ku[k]) * (system.rhs[k] - ku[k]))
                        .sum(),
                );
                Ok(KrylovReport {
                    iterations: 1,
                    residual_norm,
                    converged: residual_norm.is_finite(),
                })
            }
        }
    }

    /// Calculates the strain, stress, von Mises stress, and the degraded and pristine energies at the nodes
    fn calc_derived_fields(&self, fields: &mut ElasticFields) {
        let grid = &self.grid;
        let pristine = self.pristine;
        let disp = &fields.disp;
        fields.strain.par_for_each_mut(0, |i, j, eps| {
            let gx = stencil::nodal_gradient(disp, 0, grid, i, j);
            let gy = stencil::nodal_gradient(disp, 1, grid, i, j);
            let shear = 0.5 * (gx[1] + gy[0]);
            eps[0] = gx[0];
            eps[1] = shear;
            eps[2] = shear;
            eps[3] = gy[1];
        });
        let strain = &fields.strain;
        let model = &fields.model;
        fields.stress.par_for_each_mut(0, |i, j, sig| {
            let eps = strain_tensor(strain.at(i, j));
            let mut sigma = Tensor2::new(Mandel::Symmetric2D);
            model.get(i, j, 0).stress(&mut sigma, &eps);
            sig[0] = sigma.get(0, 0);
            sig[1] = sigma.get(0, 1);
            sig[2] = sigma.get(1, 0);
            sig[3] = sigma.get(1, 1);
        });
        fields.stress_vm.par_for_each_mut(0, |i, j, vm| {
            let eps = strain_tensor(strain.at(i, j));
            let mut sigma = Tensor2::new(Mandel::Symmetric2D);
            model.get(i, j, 0).stress(&mut sigma, &eps);
            vm[0] = sigma.invariant_sigma_d();
        });
        fields.energy.par_for_each_mut(0, |i, j, w| {
            w[0] = model.get(i, j, 0).energy_density(&strain_tensor(strain.at(i, j)));
        });
        fields.energy_pristine.par_for_each_mut(0, |i, j, w| {
            w[0] = pristine.energy_density(&strain_tensor(strain.at(i, j)));
        });
    }
}

/// Converts the row-major strain components `[xx, xy, yx, yy]` into a symmetric 2D tensor
fn strain_tensor(values: &[f64]) -> Tensor2 {
    let mut eps = Tensor2::new(Mandel::Symmetric2D);
    eps.sym_set(0, 0, values[0]);
    eps.sym_set(0, 1, values[1]);
    eps.sym_set(1, 1, values[3]);
    eps
}

/// Solves the linear system with the sparse direct solver (UMFPACK)
fn solve_direct(kk: &mut SparseMatrix, x: &mut Vector, rhs: &Vector, verbose: bool) -> Result<(), StrError> {
    let mut solver = LinSolver::new(Genie::Umfpack)?;
    solver.actual.factorize(kk, None)?;
    solver.actual.solve(x, kk, rhs, verbose)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElasticityProblem;
    use crate::base::{BottomSolver, Field, Grid, ParamCrack, ParamElastic, ParamGrid, N_GHOST_CRACK};
    use crate::fem::ElasticFields;
    use crate::material::{CrackModel, IsotropicElastic};
    use russell_lab::approx_eq;

    #[test]
    fn intact_block_under_zero_load_stays_at_rest() {
        let grid = Grid::new(&ParamGrid::sample(3)).unwrap();
        let pristine = IsotropicElastic::new(100.0, 50.0);
        let mut problem = ElasticityProblem::new(&grid, pristine, &ParamElastic::default(), 0.01).unwrap();
        let crack = CrackModel::new(&ParamCrack::sample_constant()).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, N_GHOST_CRACK);
        c.fill(1.0);
        let mut fields = ElasticFields::new(&grid, pristine);
        let report = problem.solve(0.0, &c, crack.actual.as_ref(), &mut fields).unwrap();
        assert!(report.linear.converged);
        assert_eq!(report.reaction_top, 0.0);
        let (lo, hi) = fields.disp.min_max(1);
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 0.0);
        assert_eq!(fields.model.get(1, 1, 0), pristine);
    }

    #[test]
    fn pristine_energy_ignores_damage() {
        let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
        let pristine = IsotropicElastic::new(100.0, 50.0);
        let mut param = ParamElastic::default();
        param.tol_rel = 1e-12;
        param.tol_abs = 1e-14;
        let mut problem = ElasticityProblem::new(&grid, pristine, &param, 0.1).unwrap();
        let crack = CrackModel::new(&ParamCrack::sample_constant()).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, N_GHOST_CRACK);
        c.fill(0.0); // fully broken: 10% of the stiffness retained
        let mut fields = ElasticFields::new(&grid, pristine);
        let report = problem.solve(0.01, &c, crack.actual.as_ref(), &mut fields).unwrap();
        assert!(report.linear.converged);
        approx_eq(fields.model.get(2, 2, 0).mu, 5.0, 1e-12);
        for j in 0..5 {
            for i in 0..5 {
                let w = fields.energy.get(i, j, 0);
                let w0 = fields.energy_pristine.get(i, j, 0);
                approx_eq(w, 0.1 * w0, 1e-12);
            }
        }
        let w_first = fields.energy_pristine.get(2, 2, 0);
        assert!(w_first > 0.0);

        // second solve keeps the previous pristine energy
        problem.solve(0.02, &c, crack.actual.as_ref(), &mut fields).unwrap();
        assert_eq!(fields.energy_pristine_old.get(2, 2, 0), w_first);
        approx_eq(fields.energy_pristine.get(2, 2, 0), 4.0 * w_first, 1e-9);
    }

    #[test]
    fn non_convergence_is_not_fatal() {
        let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
        let pristine = IsotropicElastic::new(100.0, 50.0);
        let crack = CrackModel::new(&ParamCrack::sample_constant()).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, N_GHOST_CRACK);
        c.fill(1.0);
        for bottom_solver in [BottomSolver::Cg, BottomSolver::Bicgstab] {
            let mut param = ParamElastic::default();
            param.max_iter = 1;
            param.bottom_solver = bottom_solver;
            let mut problem = ElasticityProblem::new(&grid, pristine, &param, 0.1).unwrap();
            let mut fields = ElasticFields::new(&grid, pristine);
            let report = problem.solve(0.01, &c, crack.actual.as_ref(), &mut fields).unwrap();
            assert!(!report.linear.converged);
            assert_eq!(report.linear.iterations, 1);
            assert!(report.norm_residual > 0.0);
            assert!(!fields.disp.contains_non_finite());

            // the next solve starts from the previous displacement
            let report = problem.solve(0.01, &c, crack.actual.as_ref(), &mut fields).unwrap();
            assert!(!report.linear.converged);
        }
    }

    #[test]
    fn non_finite_displacement_is_not_fatal() {
        let grid = Grid::new(&ParamGrid::sample(3)).unwrap();
        let pristine = IsotropicElastic::new(100.0, 50.0);
        let crack = CrackModel::new(&ParamCrack::sample_constant()).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, N_GHOST_CRACK);
        c.fill(1.0);
        let mut problem = ElasticityProblem::new(&grid, pristine, &ParamElastic::default(), 0.1).unwrap();
        let mut fields = ElasticFields::new(&grid, pristine);
        let report = problem.solve(f64::NAN, &c, crack.actual.as_ref(), &mut fields).unwrap();
        assert!(!report.linear.converged);
        assert!(fields.disp.contains_non_finite());
        assert!(fields.disp.get(1, 3, 1).is_nan());
        assert_eq!(fields.disp.get(1, 0, 1), 0.0);
    }
}
