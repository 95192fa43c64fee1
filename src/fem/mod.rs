//! Implements the finite element solution of the elasticity problem

mod elastic_bcs;
mod elastic_fields;
mod elasticity;
mod element_q4;
mod equations;
mod krylov;
mod linear_system;
pub use crate::fem::elastic_bcs::*;
pub use crate::fem::elastic_fields::*;
pub use crate::fem::elasticity::*;
pub use crate::fem::element_q4::*;
pub use crate::fem::equations::*;
pub use crate::fem::krylov::*;
pub use crate::fem::linear_system::*;
