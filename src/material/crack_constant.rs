use super::{check_crack_params, degradation_deriv, degradation_value, double_well, double_well_deriv, CrackPotential};
use crate::base::Degradation;
use crate::StrError;

/// Implements a crack model with orientation-independent fracture energy
pub struct CrackConstant {
    /// Fracture energy Gc
    gc: f64,

    /// Regularization length ζ
    zeta: f64,

    /// Mobility M
    mobility: f64,

    /// Degradation function
    degradation: Degradation,
}

impl CrackConstant {
    /// Allocates a new instance
    pub fn new(gc: f64, zeta: f64, mobility: f64, degradation: Degradation) -> Result<Self, StrError> {
        check_crack_params(gc, zeta, mobility)?;
        Ok(CrackConstant {
            gc,
            zeta,
            mobility,
            degradation,
        })
    }
}

impl CrackPotential for CrackConstant {
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

    fn epc(&self, _theta: f64) -> f64 {
        self.gc / self.zeta
    }

    fn kappa(&self, _theta: f64) -> f64 {
        self.gc * self.zeta
    }

    fn mobility(&self, _c: f64) -> f64 {
        self.mobility
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
