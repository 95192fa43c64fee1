//! Implements material models: crack potentials and the degradable elastic law

mod crack_constant;
mod crack_potential;
mod crack_sin;
mod degradation;
mod isotropic_elastic;
pub use crate::material::crack_constant::*;
pub use crate::material::crack_potential::*;
pub use crate::material::crack_sin::*;
pub use crate::material::degradation::*;
pub use crate::material::isotropic_elastic::*;
