//! Implements the staggered elasticity/damage simulation with quasi-static loading

mod brittle_fracture;
mod crack_evolution;
mod diagnostics;
mod fields;
mod loading;
mod output;
mod refinement;
mod time_loop;
pub use crate::sim::brittle_fracture::*;
pub use crate::sim::crack_evolution::*;
pub use crate::sim::diagnostics::*;
pub use crate::sim::fields::*;
pub use crate::sim::loading::*;
pub use crate::sim::output::*;
pub use crate::sim::refinement::*;
pub use crate::sim::time_loop::*;
