use super::{BcType, BottomSolver, Degradation, DEFAULT_LAMBDA, DEFAULT_MU, NDIM};
use serde::{Deserialize, Serialize};

/// Holds the parameters of the structured grid
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamGrid {
    /// Number of cells along each direction
    pub n_cell: [usize; NDIM],

    /// Lower corner of the domain
    pub prob_lo: [f64; NDIM],

    /// Upper corner of the domain
    pub prob_hi: [f64; NDIM],
}

/// Holds the parameters of the initial condition of the damage field
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamIc {
    /// Elliptical flaw with c = 0 at the center
    Ellipsoid {
        /// Center of the ellipse
        center: [f64; NDIM],

        /// Semi-axes of the ellipse
        radius: [f64; NDIM],

        /// Width of the diffuse interface (normalized radius units)
        eps: f64,
    },

    /// Horizontal slit (pre-crack) with c = 0 inside
    Notch {
        /// Center of the slit
        center: [f64; NDIM],

        /// Length of the slit along x
        length: f64,

        /// Thickness of the slit along y
        thickness: f64,

        /// Width of the diffuse interface
        eps: f64,
    },
}

/// Holds the parameters of the crack (interface) energy model
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamCrack {
    /// Orientation-independent fracture energy
    Constant {
        /// Fracture energy Gc
        gc: f64,

        /// Regularization length ζ
        zeta: f64,

        /// Mobility M (kinetic coefficient)
        mobility: f64,

        /// Degradation function
        #[serde(default)]
        degradation: Degradation,
    },

    /// Fracture energy modulated by the crack-front orientation
    ///
    /// ```text
    /// Gc(θ) = Gc_low + (Gc_high - Gc_low) sin²(θ - θ₀)
    /// ```
    Sin {
        /// Fracture energy along θ₀
        gc_low: f64,

        /// Fracture energy perpendicular to θ₀
        gc_high: f64,

        /// Reference orientation θ₀ (radians)
        theta0: f64,

        /// Regularization length ζ
        zeta: f64,

        /// Mobility M (kinetic coefficient)
        mobility: f64,

        /// Degradation function
        #[serde(default)]
        degradation: Degradation,
    },
}

/// Holds the crack model and the parameters controlling the damage evolution
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamCrackControl {
    /// Crack energy model
    pub model: ParamCrack,

    /// Smallest fraction of the pristine stiffness retained by fully broken material
    #[serde(default = "default_modulus_scaling_max")]
    pub modulus_scaling_max: f64,

    /// Cells with |∇c|·‖Δx‖ above this value are tagged for refinement
    #[serde(default = "default_refinement_threshold")]
    pub refinement_threshold: f64,

    /// Tolerance on Σ(c - c_old)²/Σc² to accept the damage field at the current load
    #[serde(default = "default_tol_crack")]
    pub tol_crack: f64,
}

/// Holds the parameters of the material model
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ParamMaterial {
    /// Linear isotropic elasticity
    Isotropic {
        /// Lamé λ parameter
        #[serde(default = "default_lambda")]
        lambda: f64,

        /// Shear modulus μ
        #[serde(default = "default_mu")]
        mu: f64,
    },
}

/// Holds the elastic boundary conditions for each face and displacement component
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamElasticBcs {
    /// Types on the x-min face (x and y components)
    pub xlo: [BcType; NDIM],

    /// Types on the x-max face
    pub xhi: [BcType; NDIM],

    /// Types on the y-min face
    pub ylo: [BcType; NDIM],

    /// Types on the y-max face
    pub yhi: [BcType; NDIM],

    /// Values on the x-min face
    pub left: [f64; NDIM],

    /// Values on the x-max face
    pub right: [f64; NDIM],

    /// Values on the y-min face
    pub bottom: [f64; NDIM],

    /// Values on the y-max face (the y component is overwritten by the load ramp)
    pub top: [f64; NDIM],
}

/// Holds the parameters of the elasticity solver
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamElastic {
    /// Relative tolerance of the linear solver (relative to the norm of the right-hand side)
    pub tol_rel: f64,

    /// Absolute tolerance of the linear solver
    pub tol_abs: f64,

    /// Maximum number of iterations of the iterative linear solvers
    pub max_iter: usize,

    /// Linear solver
    pub bottom_solver: BottomSolver,

    /// Prints the iterative-solver history
    pub verbose: bool,

    /// Uniform body force (per unit volume)
    pub body_force: [f64; NDIM],

    /// Boundary conditions
    pub bc: ParamElasticBcs,
}

/// Holds the parameters of the applied displacement ramp
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamLoading {
    /// Initial top displacement
    pub disp_init: f64,

    /// Increment of the top displacement per converged load step
    pub disp_step: f64,

    /// Top displacement ending the simulation
    pub max_disp: f64,

    /// Solves elasticity once per increment without evolving the damage
    ///
    /// Every increment up to `max_disp` is checkpointed with the initial damage field.
    pub crack_stress_test: bool,
}

fn default_modulus_scaling_max() -> f64 {
    0.02
}

fn default_refinement_threshold() -> f64 {
    0.01
}

fn default_tol_crack() -> f64 {
    1e-3
}

fn default_lambda() -> f64 {
    DEFAULT_LAMBDA
}

fn default_mu() -> f64 {
    DEFAULT_MU
}

impl Default for ParamElasticBcs {
    /// Returns a tensile test: bottom clamped, top pulled along y, lateral faces free
    fn default() -> Self {
        ParamElasticBcs {
            xlo: [BcType::Traction, BcType::Traction],
            xhi: [BcType::Traction, BcType::Traction],
            ylo: [BcType::Displacement, BcType::Displacement],
            yhi: [BcType::Traction, BcType::Displacement],
            left: [0.0, 0.0],
            right: [0.0, 0.0],
            bottom: [0.0, 0.0],
            top: [0.0, 0.0],
        }
    }
}

impl Default for ParamElastic {
    fn default() -> Self {
        ParamElastic {
            tol_rel: 1e-8,
            tol_abs: 1e-12,
            max_iter: 10_000,
            bottom_solver: BottomSolver::Cg,
            verbose: false,
            body_force: [0.0, 0.0],
            bc: ParamElasticBcs::default(),
        }
    }
}

impl Default for ParamLoading {
    fn default() -> Self {
        ParamLoading {
            disp_init: 0.0,
            disp_step: 0.001,
            max_disp: 0.01,
            crack_stress_test: false,
        }
    }
}

impl ParamGrid {
    /// Returns a sample unit square with n × n cells
    pub fn sample(n: usize) -> Self {
        ParamGrid {
            n_cell: [n, n],
            prob_lo: [0.0, 0.0],
            prob_hi: [1.0, 1.0],
        }
    }
}

impl ParamIc {
    /// Returns a sample notch along the left half of the mid-height line of the unit square
    pub fn sample_notch() -> Self {
        ParamIc::Notch {
            center: [0.0, 0.5],
            length: 0.5,
            thickness: 0.2,
            eps: 0.01,
        }
    }
}

impl ParamCrack {
    /// Returns a sample constant crack model
    pub fn sample_constant() -> Self {
        ParamCrack::Constant {
            gc: 1.0,
            zeta: 0.05,
            mobility: 1.0,
            degradation: Degradation::Square,
        }
    }

    /// Returns a sample orientation-dependent crack model
    pub fn sample_sin() -> Self {
        ParamCrack::Sin {
            gc_low: 1.0,
            gc_high: 2.0,
            theta0: 0.0,
            zeta: 0.05,
            mobility: 1.0,
            degradation: Degradation::Square,
        }
    }
}

impl ParamCrackControl {
    /// Returns a sample set of crack parameters with a constant model
    pub fn sample() -> Self {
        ParamCrackControl {
            model: ParamCrack::sample_constant(),
            modulus_scaling_max: default_modulus_scaling_max(),
            refinement_threshold: default_refinement_threshold(),
            tol_crack: default_tol_crack(),
        }
    }
}

impl ParamMaterial {
    /// Returns the sample (default) isotropic material
    pub fn sample() -> Self {
        ParamMaterial::Isotropic {
            lambda: DEFAULT_LAMBDA,
            mu: DEFAULT_MU,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamCrack, ParamCrackControl, ParamElastic, ParamIc, ParamMaterial};
    use crate::base::{BcType, BottomSolver, Degradation};

    #[test]
    fn crack_model_parses_by_type() {
        let p: ParamCrack = serde_json::from_str(r#"{"type": "constant", "gc": 2.0, "zeta": 0.1, "mobility": 3.0}"#).unwrap();
        match p {
            ParamCrack::Constant { gc, degradation, .. } => {
                assert_eq!(gc, 2.0);
                assert_eq!(degradation, Degradation::Square);
            }
            _ => panic!("constant model expected"),
        }
        let p: ParamCrack = serde_json::from_str(
            r#"{"type": "sin", "gc_low": 1.0, "gc_high": 2.0, "theta0": 0.5, "zeta": 0.1, "mobility": 1.0, "degradation": "quartic"}"#,
        )
        .unwrap();
        assert!(matches!(p, ParamCrack::Sin { degradation: Degradation::Quartic, .. }));
        let res = serde_json::from_str::<ParamCrack>(r#"{"type": "linear", "gc": 2.0, "zeta": 0.1, "mobility": 3.0}"#);
        assert!(res.is_err());
    }

    #[test]
    fn crack_control_defaults_work() {
        let p: ParamCrackControl = serde_json::from_str(
            r#"{"model": {"type": "constant", "gc": 1.0, "zeta": 0.1, "mobility": 1.0}, "tol_crack": 1e-4}"#,
        )
        .unwrap();
        assert_eq!(p.tol_crack, 1e-4);
        assert_eq!(p.modulus_scaling_max, 0.02);
        assert_eq!(p.refinement_threshold, 0.01);
    }

    #[test]
    fn material_and_ic_parse_by_tag() {
        let m: ParamMaterial = serde_json::from_str(r#"{"model": "isotropic", "lambda": 1.0}"#).unwrap();
        let ParamMaterial::Isotropic { lambda, mu } = m;
        assert_eq!(lambda, 1.0);
        assert_eq!(mu, 305.0);
        assert!(serde_json::from_str::<ParamMaterial>(r#"{"model": "cubic"}"#).is_err());

        let ic: ParamIc = serde_json::from_str(
            r#"{"type": "ellipsoid", "center": [0.5, 0.5], "radius": [0.1, 0.02], "eps": 0.1}"#,
        )
        .unwrap();
        assert!(matches!(ic, ParamIc::Ellipsoid { .. }));
        assert!(serde_json::from_str::<ParamIc>(r#"{"type": "sphere"}"#).is_err());
    }

    #[test]
    fn elastic_defaults_describe_a_tensile_test() {
        let p: ParamElastic = serde_json::from_str(r#"{"bottom_solver": "direct", "bc": {"top": [0.0, 1.0]}}"#).unwrap();
        assert_eq!(p.bottom_solver, BottomSolver::Direct);
        assert_eq!(p.bc.ylo, [BcType::Displacement, BcType::Displacement]);
        assert_eq!(p.bc.yhi, [BcType::Traction, BcType::Displacement]);
        assert_eq!(p.bc.top, [0.0, 1.0]);
        assert_eq!(p.max_iter, 10_000);
    }
}
