use super::{CrackConstant, CrackSin};
use crate::base::{Degradation, ParamCrack};
use crate::StrError;

/// Specifies the energy-functional primitives of a phase-field crack model
///
/// The damage variable `c` is 1 for intact material and 0 for fully broken material.
/// The angle `θ` is the orientation of the damage gradient.
pub trait CrackPotential: Send + Sync {
    /// Returns the stiffness degradation g(c)
    fn g_phi(&self, c: f64) -> f64;

    /// Returns the derivative of the stiffness degradation dg/dc
    fn dg_phi(&self, c: f64) -> f64;

    /// Returns the double-well potential w(c)
    fn w_phi(&self, c: f64) -> f64;

    /// Returns the derivative of the double-well potential dw/dc
    fn dw_phi(&self, c: f64) -> f64;

    /// Returns the coefficient of the double-well term Gc(θ)/ζ
    fn epc(&self, theta: f64) -> f64;

    /// Returns the coefficient of the gradient term Gc(θ)·ζ
    fn kappa(&self, theta: f64) -> f64;

    /// Returns the mobility M(c)
    fn mobility(&self, c: f64) -> f64;
}

/// Holds the actual crack model implementation
pub struct CrackModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn CrackPotential>,
}

impl CrackModel {
    /// Allocates a new instance
    pub fn new(param: &ParamCrack) -> Result<Self, StrError> {
        let actual: Box<dyn CrackPotential> = match *param {
            ParamCrack::Constant {
                gc,
                zeta,
                mobility,
                degradation,
            } => Box::new(CrackConstant::new(gc, zeta, mobility, degradation)?),
            ParamCrack::Sin {
                gc_low,
                gc_high,
                theta0,
                zeta,
                mobility,
                degradation,
            } => Box::new(CrackSin::new(gc_low, gc_high, theta0, zeta, mobility, degradation)?),
        };
        Ok(CrackModel { actual })
    }
}

/// Checks the parameters shared by all crack models
pub(crate) fn check_crack_params(gc: f64, zeta: f64, mobility: f64) -> Result<(), StrError> {
    if !(gc >= 0.0) {
        return Err("gc must be ≥ 0.0");
    }
    if !(zeta > 0.0) {
        return Err("zeta must be > 0.0");
    }
    if !(mobility >= 0.0) {
        return Err("mobility must be ≥ 0.0");
    }
    Ok(())
}

/// Evaluates the degradation function g(c)
#[inline]
pub fn degradation_value(kind: Degradation, c: f64) -> f64 {
    match kind {
        Degradation::Square => c * c,
        Degradation::Quartic => 4.0 * c * c * c - 3.0 * c * c * c * c,
    }
}

/// Evaluates the derivative of the degradation function dg/dc
#[inline]
pub fn degradation_deriv(kind: Degradation, c: f64) -> f64 {
    match kind {
        Degradation::Square => 2.0 * c,
        Degradation::Quartic => 12.0 * c * c - 12.0 * c * c * c,
    }
}

/// Evaluates the double-well potential w(c) = c²(1 - c)²
#[inline]
pub fn double_well(c: f64) -> f64 {
    c * c * (1.0 - c) * (1.0 - c)
}

/// Evaluates the derivative of the double-well potential dw/dc = 2c(1 - c)(1 - 2c)
#[inline]
pub fn double_well_deriv(c: f64) -> f64 {
    2.0 * c * (1.0 - c) * (1.0 - 2.0 * c)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
