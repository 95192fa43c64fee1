use super::{evolve_crack, integrate_norms, tag_cells, Flow, FractureFields, Integrator};
use super::{LoadingPhase, LoadingState, Output, TimeLoop, TimeLoopSummary};
use crate::base::{set_initial_damage, Config, Grid, ParamMaterial};
use crate::fem::{ElasticReport, ElasticityProblem};
use crate::material::{CrackModel, IsotropicElastic};
use crate::StrError;

/// Implements the quasi-static brittle fracture simulation
///
/// Each pseudo-time step solves the elastic equilibrium at the current applied displacement and
/// advances the damage field once. The applied displacement is only increased after the damage
/// field has converged at the current load.
pub struct BrittleFracture {
    /// Input data
    pub config: Config,

    /// Structured grid
    pub grid: Grid,

    /// Crack potential
    pub crack: CrackModel,

    /// Elasticity boundary-value problem
    pub elasticity: ElasticityProblem,

    /// Damage, driving force, tags, and elastic fields
    pub fields: FractureFields,

    /// Applied displacement ramp
    pub loading: LoadingState,

    /// Checkpoint writer
    pub output: Output,

    /// Results of the last elastic solve
    pub last_report: Option<ElasticReport>,

    /// Number of cells tagged at the last regrid
    pub n_tagged: usize,

    /// Number of damage values clamped at the last evolution step
    pub n_clamped: usize,
}

impl BrittleFracture {
    /// Allocates a new instance
    pub fn new(config: &Config, output: Output) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            tracing::error!("{}", msg);
            return Err("cannot allocate simulation because config.validate() failed");
        }
        let grid = Grid::new(&config.grid)?;
        let crack = CrackModel::new(&config.crack.model)?;
        let pristine = match config.material {
            ParamMaterial::Isotropic { lambda, mu } => IsotropicElastic::new(lambda, mu),
        };
        let (young, poisson) = pristine.young_poisson();
        tracing::info!(
            lambda = pristine.lambda,
            mu = pristine.mu,
            young,
            poisson,
            "pristine material"
        );
        let elasticity = ElasticityProblem::new(
            &grid,
            pristine,
            &config.elastic,
            config.crack.modulus_scaling_max,
        )?;
        let fields = FractureFields::new(&grid, pristine);
        let loading = LoadingState::new(&config.loading, config.crack.tol_crack);
        Ok(BrittleFracture {
            config: *config,
            grid,
            crack,
            elasticity,
            fields,
            loading,
            output,
            last_report: None,
            n_tagged: 0,
            n_clamped: 0,
        })
    }

    /// Runs the simulation until the applied displacement reaches its maximum
    ///
    /// Writes the summary (and the PVD collection) at the end.
    pub fn run(&mut self) -> Result<TimeLoopSummary, StrError> {
        let control = self.config.control;
        let summary = TimeLoop::evolve(self, &control)?;
        self.output.finish()?;
        tracing::info!(
            n_steps = summary.n_steps,
            t = summary.t,
            n_load_steps = self.loading.load_step,
            ramp = self.loading.ramp,
            "simulation finished"
        );
        Ok(summary)
    }
}

impl Integrator for BrittleFracture {
    fn initialize(&mut self) -> Result<(), StrError> {
        set_initial_damage(&mut self.fields.c, &self.grid, &self.config.ic);
        self.fields.fill_crack_ghosts();
        self.fields.c_old.copy_from(&self.fields.c)?;
        let (c_min, c_max) = self.fields.c.min_max(0);
        tracing::info!(
            nx = self.grid.nx,
            ny = self.grid.ny,
            c_min,
            c_max,
            "initial damage field set"
        );
        Ok(())
    }

    fn time_step_begin(&mut self, _t: f64, step: usize) -> Result<(), StrError> {
        if self.loading.begin_step() {
            tracing::debug!(
                step,
                load_step = self.loading.load_step,
                ramp = self.loading.ramp,
                "starting load increment"
            );
        }
        let report = self.elasticity.solve(
            self.loading.ramp,
            &self.fields.c,
            self.crack.actual.as_ref(),
            &mut self.fields.elastic,
        )?;
        self.last_report = Some(report);
        Ok(())
    }

    fn advance(&mut self, _t: f64, dt: f64) -> Result<(), StrError> {
        // frozen damage: each step is one converged increment
        if self.config.loading.crack_stress_test {
            return Ok(());
        }
        self.loading.phase = LoadingPhase::EvolvingCrack;
        self.n_clamped = evolve_crack(&mut self.fields, self.crack.actual.as_ref(), &self.grid, dt)?;
        Ok(())
    }

    fn time_step_complete(&mut self, t: f64, step: usize) -> Result<Flow, StrError> {
        let report = self.last_report.ok_or("the elastic problem has not been solved")?;
        let control = &self.config.control;

        let converged = if self.config.loading.crack_stress_test {
            true
        } else {
            let norms = integrate_norms(&self.fields.c, &self.fields.c_old, &self.grid);
            control.print_step(
                step,
                t,
                self.loading.load_step,
                self.loading.ramp,
                norms.relative_error(),
                self.loading.tol,
            );
            self.loading.check_convergence(norms)
        };
        if !converged {
            return Ok(Flow::Continue);
        }

        self.output.checkpoint(
            self.loading.load_step,
            step,
            t,
            self.loading.ramp,
            report.reaction_top,
            &self.grid,
            &self.fields,
        )?;
        control.print_load_step(step, t, self.loading.load_step, self.loading.ramp, report.norm_residual);
        tracing::debug!(
            load_step = self.loading.load_step,
            ramp = self.loading.ramp,
            reaction_top = report.reaction_top,
            "load increment converged"
        );

        if self.loading.accept_increment() {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    fn regrid(&mut self, step: usize) -> Result<(), StrError> {
        self.n_tagged = tag_cells(
            &mut self.fields.tags,
            &self.fields.c,
            &self.grid,
            self.config.crack.refinement_threshold,
        );
        tracing::info!(step, n_tagged = self.n_tagged, "cells tagged for refinement");
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
