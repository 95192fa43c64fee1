use crate::base::{Field, GhostBc, Grid, N_GHOST_CRACK, N_TENSOR_COMP};
use crate::fem::ElasticFields;
use crate::material::IsotropicElastic;

/// Defines the ghost treatment of the damage fields (zero normal derivative)
pub const CRACK_GHOST_BCS: [GhostBc; 2] = [GhostBc::Neumann, GhostBc::Neumann];

/// Holds all fields of a brittle fracture simulation
pub struct FractureFields {
    /// Damage at the current iteration (1 = intact, 0 = broken)
    pub c: Field<f64>,

    /// Damage at the previous iteration
    pub c_old: Field<f64>,

    /// Driving force components: elastic, surface, gradient, and the clipped total
    pub driving_force: Field<f64>,

    /// Cells flagged for refinement
    pub tags: Field<bool>,

    /// Node-centered fields of the elasticity problem
    pub elastic: ElasticFields,
}

impl FractureFields {
    /// Allocates a new instance with intact material
    pub fn new(grid: &Grid, pristine: IsotropicElastic) -> Self {
        let mut c = Field::new_cell(grid, 1, N_GHOST_CRACK);
        c.fill(1.0);
        let c_old = c.clone();
        FractureFields {
            c,
            c_old,
            driving_force: Field::new_cell(grid, N_TENSOR_COMP, N_GHOST_CRACK),
            tags: Field::new_cell(grid, 1, 0),
            elastic: ElasticFields::new(grid, pristine),
        }
    }

    /// Swaps the current and previous damage fields
    pub fn swap_crack(&mut self) {
        std::mem::swap(&mut self.c, &mut self.c_old);
    }

    /// Fills the ghost layers of both damage fields
    pub fn fill_crack_ghosts(&mut self) {
        self.c.fill_boundary(CRACK_GHOST_BCS);
        self.c_old.fill_boundary(CRACK_GHOST_BCS);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
