use super::{check_crack_params, degradation_deriv, degradation_value, double_well, double_well_deriv, CrackPotential};
use crate::base::Degradation;
use crate::StrError;

/// Implements a crack model whose fracture energy depends on the crack-front orientation
///
/// ```text
/// Gc(θ) = Gc_low + (Gc_high - Gc_low) sin²(θ - θ₀)
/// ```
pub struct CrackSin {
    /// Fracture energy along θ₀
    gc_low: f64,

    /// Fracture energy perpendicular to θ₀
    gc_high: f64,

    /// Reference orientation θ₀
    theta0: f64,

    /// Regularization length ζ
    zeta: f64,

    /// Mobility M
    mobility: f64,

    /// Degradation function
    degradation: Degradation,
}

impl CrackSin {
    /// Allocates a new instance
    pub fn new(
        gc_low: f64,
        gc_high: f64,
        theta0: f64,
        zeta: f64,
        mobility: f64,
        degradation: Degradation,
    ) -> Result<Self, StrError> {
        check_crack_params(gc_low, zeta, mobility)?;
        if !(gc_high >= gc_low) {
            return Err("gc_high must be ≥ gc_low");
        }
        Ok(CrackSin {
            gc_low,
            gc_high,
            theta0,
            zeta,
            mobility,
            degradation,
        })
    }

    /// Returns the fracture energy Gc(θ)
    pub fn gc(&self, theta: f64) -> f64 {
        let s = f64::sin(theta - self.theta0);
        self.gc_low + (self.gc_high - self.gc_low) * s * s
    }
}

impl CrackPotential for CrackSin {
    fn g_phi(&self, c: f64) -> f64 {
        degradation_value(self.degradation, c)
    }

    fn dg_phi(&self, c: f64) -> f64 {
        degradation_deriv(self.degradation, c)
    }

    fn w_phi(&self, c: f64) -> f64 {
        double_well(c)
    }

    fn dw_phi(&self, c: f64) -> f64 {
        double_well_deriv(c)
    }

    fn epc(&self, theta: f64) -> f64 {
        self.gc(theta) / self.zeta
    }

    fn kappa(&self, theta: f64) -> f64 {
        self.gc(theta) * self.zeta
    }

    fn mobility(&self, _c: f64) -> f64 {
        self.mobility
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
