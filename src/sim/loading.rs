use super::Norms;
use crate::base::{ParamLoading, DEFAULT_DISP_STEP};
use serde::{Deserialize, Serialize};

/// Defines the phases of the quasi-static loading cycle
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum LoadingPhase {
    /// The applied displacement is being increased
    SteppingLoad,

    /// The elastic equilibrium is being solved at the current load
    SolvingElasticity,

    /// The damage field is being advanced
    EvolvingCrack,

    /// The damage field is being checked for convergence
    ConvergenceCheck,

    /// The applied displacement reached its maximum
    Finished,
}

/// Holds the state of the applied displacement ramp
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct LoadingState {
    /// Current top displacement
    pub ramp: f64,

    /// Number of converged load increments
    pub load_step: usize,

    /// Norms of the last convergence check
    pub norms: Norms,

    /// Indicates that the next step starts a new load increment
    pub new_load_step: bool,

    /// Current phase
    pub phase: LoadingPhase,

    /// Initial top displacement
    pub init: f64,

    /// Increment of the top displacement
    pub rate: f64,

    /// Top displacement ending the simulation
    pub max: f64,

    /// Tolerance on the relative change of the damage field
    pub tol: f64,
}

impl LoadingState {
    /// Allocates a new instance
    ///
    /// **Note:** A negative increment is replaced by the default one; a negative maximum
    /// (or a maximum smaller than the increment) is replaced by the increment. Both cases log a warning.
    pub fn new(param: &ParamLoading, tol_crack: f64) -> Self {
        let mut rate = param.disp_step;
        if !(rate >= 0.0) {
            tracing::warn!(
                disp_step = rate,
                "load increment must be non-negative; resetting to {}",
                DEFAULT_DISP_STEP
            );
            rate = DEFAULT_DISP_STEP;
        }
        let mut max = param.max_disp;
        if !(max >= 0.0) || max < rate {
            tracing::warn!(
                max_disp = max,
                disp_step = rate,
                "maximum displacement must be non-negative and not smaller than the increment; resetting to {}",
                rate
            );
            max = rate;
        }
        if rate == 0.0 && param.disp_init < max {
            tracing::warn!("the load ramp does not increase; the simulation stops at max_step");
        }
        LoadingState {
            ramp: param.disp_init,
            load_step: 0,
            norms: Norms::default(),
            new_load_step: true,
            phase: LoadingPhase::SteppingLoad,
            init: param.disp_init,
            rate,
            max,
            tol: tol_crack,
        }
    }

    /// Starts a pseudo-time step, setting the applied displacement if a new increment is due
    ///
    /// Returns true if a new increment has started.
    pub fn begin_step(&mut self) -> bool {
        let stepped = self.new_load_step;
        if stepped {
            self.ramp = self.init + (self.load_step as f64) * self.rate;
            self.new_load_step = false;
        }
        self.phase = LoadingPhase::SolvingElasticity;
        stepped
    }

    /// Stores the norms and returns true if the damage field has converged at the current load
    pub fn check_convergence(&mut self, norms: Norms) -> bool {
        self.phase = LoadingPhase::ConvergenceCheck;
        self.norms = norms;
        if self.norms.relative_error() > self.tol {
            self.phase = LoadingPhase::SolvingElasticity;
            return false;
        }
        true
    }

    /// Accepts the current increment and flags the next one
    ///
    /// Returns true if the applied displacement reached its maximum.
    pub fn accept_increment(&mut self) -> bool {
        self.norms = Norms::default();
        self.load_step += 1;
        self.new_load_step = true;
        if self.ramp >= self.max {
            self.phase = LoadingPhase::Finished;
            return true;
        }
        self.phase = LoadingPhase::SteppingLoad;
        false
    }

    /// Indicates whether the loading has finished
    pub fn finished(&self) -> bool {
        self.phase == LoadingPhase::Finished
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
