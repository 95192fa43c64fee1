use crate::base::{Field, Grid, NDIM, N_GHOST_MODEL, N_TENSOR_COMP};
use crate::material::IsotropicElastic;

/// Holds the node-centered fields of the elasticity problem
///
/// Tensors are stored row-major as `[xx, xy, yx, yy]`.
pub struct ElasticFields {
    /// Displacement (2 components)
    pub disp: Field<f64>,

    /// External nodal forces: body force and tractions (2 components)
    pub rhs: Field<f64>,

    /// Out-of-balance forces f_ext - f_int at the free equations (2 components)
    pub residual: Field<f64>,

    /// Small strain tensor
    pub strain: Field<f64>,

    /// Stress tensor (degraded material)
    pub stress: Field<f64>,

    /// von Mises equivalent stress
    pub stress_vm: Field<f64>,

    /// Strain energy density (degraded material)
    pub energy: Field<f64>,

    /// Strain energy density of the undamaged material (drives the damage)
    pub energy_pristine: Field<f64>,

    /// Pristine energy of the previous solve
    pub energy_pristine_old: Field<f64>,

    /// Degraded material model at each node
    pub model: Field<IsotropicElastic>,
}

impl ElasticFields {
    /// Allocates a new instance
    pub fn new(grid: &Grid, pristine: IsotropicElastic) -> Self {
        let mut model = Field::new_node(grid, 1, N_GHOST_MODEL);
        model.fill(pristine);
        ElasticFields {
            disp: Field::new_node(grid, NDIM, 0),
            rhs: Field::new_node(grid, NDIM, 0),
            residual: Field::new_node(grid, NDIM, 0),
            strain: Field::new_node(grid, N_TENSOR_COMP, 0),
            stress: Field::new_node(grid, N_TENSOR_COMP, 0),
            stress_vm: Field::new_node(grid, 1, 0),
            energy: Field::new_node(grid, 1, 0),
            energy_pristine: Field::new_node(grid, 1, 0),
            energy_pristine_old: Field::new_node(grid, 1, 0),
            model,
        }
    }

    /// Moves the pristine energy into the old slot and zeroes the current one
    pub fn swap_pristine_energy(&mut self) {
        std::mem::swap(&mut self.energy_pristine, &mut self.energy_pristine_old);
        self.energy_pristine.fill(0.0);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
