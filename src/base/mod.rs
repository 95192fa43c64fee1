//! Implements the base structures for a phase-field fracture simulation

mod config;
mod constants;
mod control;
mod enums;
mod field;
mod grid;
mod initial_condition;
mod parameters;
pub mod stencil;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::control::*;
pub use crate::base::enums::*;
pub use crate::base::field::*;
pub use crate::base::grid::*;
pub use crate::base::initial_condition::*;
pub use crate::base::parameters::*;
