use super::FractureFields;
use crate::base::{stencil, Grid};
use crate::material::CrackPotential;
use crate::StrError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Calculates the driving force of the damage evolution at each valid cell
///
/// Components: `[elastic, surface, gradient, max(0, elastic + surface - gradient)]`.
/// The ghost values of `c_old` must be valid.
pub fn calc_driving_force(fields: &mut FractureFields, crack: &dyn CrackPotential, grid: &Grid) -> Result<(), StrError> {
    let c_old = &fields.c_old;
    let energy = &fields.elastic.energy_pristine;
    fields.driving_force.par_try_for_each_mut(0, |i, j, df| {
        let c = c_old.get(i, j, 0);
        let laplacian = stencil::laplacian(c_old, 0, grid, i, j);
        let grad = stencil::gradient(c_old, 0, grid, i, j);
        let theta = f64::atan2(grad[1], grad[0]);
        let en_cell = stencil::node_to_cell_average(energy, 0, i, j);
        let elastic = crack.dg_phi(c) * en_cell;
        let surface = crack.epc(theta) * crack.dw_phi(c);
        let gradient = crack.kappa(theta) * laplacian;
        let rhs = elastic + surface - gradient;
        if !rhs.is_finite() {
            tracing::error!(
                i,
                j,
                c_old = c,
                elastic,
                surface,
                gradient,
                energy = en_cell,
                "driving force is not finite"
            );
            return Err("driving force is not finite");
        }
        df[0] = elastic;
        df[1] = surface;
        df[2] = gradient;
        df[3] = f64::max(0.0, rhs);
        Ok(())
    })
}

/// Updates the damage explicitly from the previous damage and the clipped driving force
///
/// `c = clamp(c_old - Δt · max(0, rhs) · M(c_old), 0, 1)`
///
/// Returns the number of clamped cells.
pub fn update_crack(fields: &mut FractureFields, crack: &dyn CrackPotential, dt: f64) -> usize {
    let c_old = &fields.c_old;
    let driving_force = &fields.driving_force;
    let n_clamped = AtomicUsize::new(0);
    fields.c.par_for_each_mut(0, |i, j, c| {
        let old = c_old.get(i, j, 0);
        let value = old - dt * driving_force.get(i, j, 3) * crack.mobility(old);
        c[0] = if value > 1.0 {
            tracing::debug!(i, j, c_new = value, "resetting damage to 1.0");
            n_clamped.fetch_add(1, Ordering::Relaxed);
            1.0
        } else if value < 0.0 {
            tracing::debug!(i, j, c_new = value, "resetting damage to 0.0");
            n_clamped.fetch_add(1, Ordering::Relaxed);
            0.0
        } else {
            value
        };
    });
    n_clamped.into_inner()
}

/// Advances the damage field by one explicit step
///
/// Swaps the damage buffers, computes the driving force from the pristine energy, and updates the damage.
/// Returns the number of clamped cells.
pub fn evolve_crack(
    fields: &mut FractureFields,
    crack: &dyn CrackPotential,
    grid: &Grid,
    dt: f64,
) -> Result<usize, StrError> {
    fields.swap_crack();
    fields.fill_crack_ghosts();
    calc_driving_force(fields, crack, grid)?;
    let n_clamped = update_crack(fields, crack, dt);
    fields.fill_crack_ghosts();
    if n_clamped > 0 {
        tracing::info!(n_clamped, "damage values were clamped to [0, 1]");
    }
    Ok(n_clamped)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
