//! Makes available common structures needed to run a simulation
//!
//! You may write `use pfsim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{
    BcType, BottomSolver, Config, Control, Degradation, Field, GhostBc, Grid, ParamCrack, ParamCrackControl,
    ParamElastic, ParamGrid, ParamIc, ParamLoading, ParamMaterial, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR,
};
pub use crate::material::{CrackModel, CrackPotential, IsotropicElastic};
pub use crate::sim::{
    BrittleFracture, Flow, Integrator, LoadingPhase, LoadingState, Output, OutputSummary, TimeLoop, TimeLoopSummary,
};
pub use crate::StrError;
