use super::{CrackPotential, IsotropicElastic};
use crate::base::{Field, GhostBc};

/// Returns the stiffness loss from the cell-averaged degradation
///
/// The average is clipped to [0, 1] and the loss never exceeds `1 - modulus_scaling_max`,
/// thus the retained fraction `1 - loss` lies in `[modulus_scaling_max, 1]`.
#[inline]
pub fn modulus_loss(avg_g: f64, modulus_scaling_max: f64) -> f64 {
    let avg = f64::clamp(avg_g, 0.0, 1.0);
    f64::min(1.0 - avg, 1.0 - modulus_scaling_max)
}

/// Degrades the node-centered material models according to the damage field
///
/// Each node, including the ghost layers of `model`, averages g(c) over its four adjacent cells.
/// The damage field must have one more ghost layer than `model` and valid ghost values.
/// Along periodic directions the cells are read with wrap-around, thus both copies of a seam
/// node get the same stiffness whatever the ghost values of `c`.
/// The ghost layers of `model` are synchronized afterwards (two passes).
pub fn degrade_model_field(
    model: &mut Field<IsotropicElastic>,
    c: &Field<f64>,
    crack: &dyn CrackPotential,
    modulus_scaling_max: f64,
    ghost_bcs: [GhostBc; 2],
) {
    let grow = usize::min(model.n_ghost(), c.n_ghost().saturating_sub(1));
    let n_cell = c.n_valid();
    let cell = |k: isize, dir: usize| match ghost_bcs[dir] {
        GhostBc::Periodic => k.rem_euclid(n_cell[dir] as isize),
        GhostBc::Neumann => k,
    };
    model.par_for_each_mut(grow, |i, j, values| {
        let (ia, ib) = (cell(i - 1, 0), cell(i, 0));
        let (ja, jb) = (cell(j - 1, 1), cell(j, 1));
        let sum = crack.g_phi(c.get(ia, ja, 0))
            + crack.g_phi(c.get(ib, ja, 0))
            + crack.g_phi(c.get(ia, jb, 0))
            + crack.g_phi(c.get(ib, jb, 0));
        values[0].degrade_modulus(modulus_loss(0.25 * sum, modulus_scaling_max));
    });
    model.fill_boundary(ghost_bcs);
    model.fill_boundary(ghost_bcs);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
