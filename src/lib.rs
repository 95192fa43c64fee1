//! Phase-field brittle fracture simulator
//!
//! A scalar damage field `c` (1 = intact, 0 = broken) evolves on a structured 2D grid.
//! At each load increment the elastic displacement is solved to equilibrium with the
//! stiffness degraded by the damage; the undamaged (pristine) strain energy then drives
//! the explicit damage update. The applied displacement is only increased once the
//! damage field has converged at the current load (quasi-static loading).

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod material;
pub mod prelude;
pub mod sim;
