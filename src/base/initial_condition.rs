use super::{Field, Grid, ParamIc};

/// Sets the initial damage field (1 = intact, 0 = broken) on the valid cells
///
/// **Note:** The ghost layers must be filled afterwards.
pub fn set_initial_damage(c: &mut Field<f64>, grid: &Grid, param: &ParamIc) {
    let ic = *param;
    c.par_for_each_mut(0, |i, j, values| {
        let x = grid.cell_center(i, j);
        values[0] = f64::clamp(initial_damage(&ic, x), 0.0, 1.0);
    });
}

/// Returns the initial damage at point x
pub fn initial_damage(param: &ParamIc, x: [f64; 2]) -> f64 {
    match *param {
        ParamIc::Ellipsoid { center, radius, eps } => {
            let rx = (x[0] - center[0]) / radius[0];
            let ry = (x[1] - center[1]) / radius[1];
            let r = f64::sqrt(rx * rx + ry * ry);
            0.5 + 0.5 * f64::tanh((r - 1.0) / eps)
        }
        ParamIc::Notch {
            center,
            length,
            thickness,
            eps,
        } => {
            // signed distance to the slit (negative inside)
            let qx = f64::abs(x[0] - center[0]) - 0.5 * length;
            let qy = f64::abs(x[1] - center[1]) - 0.5 * thickness;
            let outside = f64::sqrt(f64::max(qx, 0.0).powi(2) + f64::max(qy, 0.0).powi(2));
            let dist = outside + f64::min(f64::max(qx, qy), 0.0);
            0.5 + 0.5 * f64::tanh(dist / eps)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
