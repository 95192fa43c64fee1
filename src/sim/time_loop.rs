use crate::base::Control;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Tells the time loop whether to keep going
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Flow {
    Continue,
    Stop,
}

/// Defines the hooks called by the time loop
pub trait Integrator {
    /// Sets the initial state (called once, before the first step)
    fn initialize(&mut self) -> Result<(), StrError>;

    /// Prepares the step starting at `t`
    fn time_step_begin(&mut self, t: f64, step: usize) -> Result<(), StrError>;

    /// Advances the state from `t` to `t + dt`
    fn advance(&mut self, t: f64, dt: f64) -> Result<(), StrError>;

    /// Finishes the step ending at `t` and decides whether to continue
    fn time_step_complete(&mut self, t: f64, step: usize) -> Result<Flow, StrError>;

    /// Adapts the grid (called every `regrid_int` steps)
    fn regrid(&mut self, _step: usize) -> Result<(), StrError> {
        Ok(())
    }
}

/// Holds the outcome of a time loop
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimeLoopSummary {
    /// Number of steps taken
    pub n_steps: usize,

    /// Final pseudo-time
    pub t: f64,

    /// Indicates that the integrator requested the stop
    pub stopped_by_integrator: bool,
}

/// Runs pseudo-time steps of constant size
pub struct TimeLoop;

impl TimeLoop {
    /// Evolves the integrator until it stops, `stop_time` is passed, or `max_step` is reached
    pub fn evolve(integrator: &mut dyn Integrator, control: &Control) -> Result<TimeLoopSummary, StrError> {
        if let Some(msg) = control.validate() {
            tracing::error!("{}", msg);
            return Err("cannot run the time loop because control.validate() failed");
        }
        integrator.initialize()?;
        control.print_header();

        let mut t = 0.0;
        for step in 0..control.max_step {
            if t >= control.stop_time {
                return Ok(TimeLoopSummary {
                    n_steps: step,
                    t,
                    stopped_by_integrator: false,
                });
            }
            if control.regrid_int > 0 && step % control.regrid_int == 0 {
                integrator.regrid(step)?;
            }
            integrator.time_step_begin(t, step)?;
            integrator.advance(t, control.dt)?;
            t += control.dt;
            if integrator.time_step_complete(t, step)? == Flow::Stop {
                return Ok(TimeLoopSummary {
                    n_steps: step + 1,
                    t,
                    stopped_by_integrator: true,
                });
            }
        }

        tracing::warn!(max_step = control.max_step, t, "the maximum number of steps was reached");
        Ok(TimeLoopSummary {
            n_steps: control.max_step,
            t,
            stopped_by_integrator: false,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
