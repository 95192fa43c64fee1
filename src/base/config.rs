use super::{
    BcType, Control, ParamCrack, ParamCrackControl, ParamElastic, ParamGrid, ParamIc, ParamLoading, ParamMaterial,
};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds all input data of a brittle fracture simulation
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Structured grid
    pub grid: ParamGrid,

    /// Initial damage field
    pub ic: ParamIc,

    /// Crack model and damage-evolution parameters
    pub crack: ParamCrackControl,

    /// Pristine material
    pub material: ParamMaterial,

    /// Elasticity solver and boundary conditions
    #[serde(default)]
    pub elastic: ParamElastic,

    /// Applied displacement ramp
    #[serde(default)]
    pub loading: ParamLoading,

    /// Pseudo-time loop
    #[serde(default)]
    pub control: Control,
}

impl Config {
    /// Returns a small sample configuration (notched unit square in tension)
    pub fn sample(n: usize) -> Self {
        Config {
            grid: ParamGrid::sample(n),
            ic: ParamIc::sample_notch(),
            crack: ParamCrackControl::sample(),
            material: ParamMaterial::sample(),
            elastic: ParamElastic::default(),
            loading: ParamLoading::default(),
            control: Control::new(),
        }
    }

    /// Reads a JSON file containing the configuration
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let config = serde_json::from_reader(buffered).map_err(|err| {
            tracing::error!(path = %path.display(), %err, "invalid configuration");
            "cannot parse JSON file"
        })?;
        Ok(config)
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        // grid
        for d in 0..2 {
            if self.grid.n_cell[d] < 1 {
                return Some(format!("n_cell[{}] = 0 is incorrect; it must be ≥ 1", d));
            }
            let length = self.grid.prob_hi[d] - self.grid.prob_lo[d];
            if !(length > 0.0) {
                return Some(format!(
                    "prob_hi[{}] = {:?} is incorrect; it must be > prob_lo[{}] = {:?}",
                    d, self.grid.prob_hi[d], d, self.grid.prob_lo[d]
                ));
            }
        }

        // initial condition
        match self.ic {
            ParamIc::Ellipsoid { radius, eps, .. } => {
                if !(radius[0] > 0.0 && radius[1] > 0.0) {
                    return Some(format!("radius = {:?} is incorrect; it must be > 0.0", radius));
                }
                if !(eps > 0.0) {
                    return Some(format!("ic.eps = {:?} is incorrect; it must be > 0.0", eps));
                }
            }
            ParamIc::Notch {
                length, thickness, eps, ..
            } => {
                if !(length > 0.0 && thickness > 0.0) {
                    return Some(format!(
                        "notch length = {:?} and thickness = {:?} are incorrect; they must be > 0.0",
                        length, thickness
                    ));
                }
                if !(eps > 0.0) {
                    return Some(format!("ic.eps = {:?} is incorrect; it must be > 0.0", eps));
                }
            }
        }

        // crack
        let (zeta, mobility) = match self.crack.model {
            ParamCrack::Constant { gc, zeta, mobility, .. } => {
                if !(gc >= 0.0) {
                    return Some(format!("gc = {:?} is incorrect; it must be ≥ 0.0", gc));
                }
                (zeta, mobility)
            }
            ParamCrack::Sin {
                gc_low,
                gc_high,
                zeta,
                mobility,
                ..
            } => {
                if !(gc_low >= 0.0) {
                    return Some(format!("gc_low = {:?} is incorrect; it must be ≥ 0.0", gc_low));
                }
                if !(gc_high >= gc_low) {
                    return Some(format!(
                        "gc_high = {:?} is incorrect; it must be ≥ gc_low = {:?}",
                        gc_high, gc_low
                    ));
                }
                (zeta, mobility)
            }
        };
        if !(zeta > 0.0) {
            return Some(format!("zeta = {:?} is incorrect; it must be > 0.0", zeta));
        }
        if !(mobility >= 0.0) {
            return Some(format!("mobility = {:?} is incorrect; it must be ≥ 0.0", mobility));
        }
        let smax = self.crack.modulus_scaling_max;
        if !(smax >= 0.0 && smax <= 1.0) {
            return Some(format!(
                "modulus_scaling_max = {:?} is incorrect; it must be 0.0 ≤ s ≤ 1.0",
                smax
            ));
        }
        if !(self.crack.tol_crack > 0.0) {
            return Some(format!(
                "tol_crack = {:?} is incorrect; it must be > 0.0",
                self.crack.tol_crack
            ));
        }
        if !(self.crack.refinement_threshold >= 0.0) {
            return Some(format!(
                "refinement_threshold = {:?} is incorrect; it must be ≥ 0.0",
                self.crack.refinement_threshold
            ));
        }

        // elasticity
        if self.elastic.max_iter < 1 {
            return Some(format!(
                "max_iter = {} is incorrect; it must be ≥ 1",
                self.elastic.max_iter
            ));
        }
        if !(self.elastic.tol_rel >= 0.0 && self.elastic.tol_abs >= 0.0) {
            return Some(format!(
                "tol_rel = {:?} and tol_abs = {:?} are incorrect; they must be ≥ 0.0",
                self.elastic.tol_rel, self.elastic.tol_abs
            ));
        }
        let bc = &self.elastic.bc;
        for d in 0..2 {
            if (bc.xlo[d] == BcType::Periodic) != (bc.xhi[d] == BcType::Periodic) {
                return Some(format!("periodic condition on x faces must be set on both xlo and xhi (component {})", d));
            }
            if (bc.ylo[d] == BcType::Periodic) != (bc.yhi[d] == BcType::Periodic) {
                return Some(format!("periodic condition on y faces must be set on both ylo and yhi (component {})", d));
            }
        }
        if bc.yhi[1] != BcType::Displacement {
            return Some("yhi[1] must be displacement because it carries the load ramp".to_string());
        }

        // control
        if let Some(msg) = self.control.validate() {
            return Some(msg);
        }
        None // all good
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "grid = {:?}\n", self.grid)?;
        write!(f, "ic = {:?}\n", self.ic)?;
        write!(f, "crack = {:?}\n", self.crack)?;
        write!(f, "material = {:?}\n", self.material)?;
        write!(f, "elastic = {:?}\n", self.elastic)?;
        write!(f, "loading = {:?}\n", self.loading)?;
        write!(f, "control = {:?}\n", self.control)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::base::{BcType, ParamCrack, DEFAULT_TEST_DIR};
    use std::fs;

    #[test]
    fn sample_is_valid() {
        let config = Config::sample(8);
        assert_eq!(config.validate(), None);
        let text = format!("{}", config);
        assert!(text.contains("Configuration data"));
    }

    #[test]
    fn validate_captures_errors() {
        let mut config = Config::sample(4);
        config.grid.n_cell[1] = 0;
        assert_eq!(
            config.validate(),
            Some("n_cell[1] = 0 is incorrect; it must be ≥ 1".to_string())
        );

        let mut config = Config::sample(4);
        config.grid.prob_hi[0] = 0.0;
        assert_eq!(
            config.validate(),
            Some("prob_hi[0] = 0.0 is incorrect; it must be > prob_lo[0] = 0.0".to_string())
        );

        let mut config = Config::sample(4);
        config.crack.model = ParamCrack::Sin {
            gc_low: 2.0,
            gc_high: 1.0,
            theta0: 0.0,
            zeta: 0.1,
            mobility: 1.0,
            degradation: Default::default(),
        };
        assert_eq!(
            config.validate(),
            Some("gc_high = 1.0 is incorrect; it must be ≥ gc_low = 2.0".to_string())
        );

        let mut config = Config::sample(4);
        config.crack.modulus_scaling_max = 1.5;
        assert_eq!(
            config.validate(),
            Some("modulus_scaling_max = 1.5 is incorrect; it must be 0.0 ≤ s ≤ 1.0".to_string())
        );

        let mut config = Config::sample(4);
        config.crack.tol_crack = 0.0;
        assert_eq!(
            config.validate(),
            Some("tol_crack = 0.0 is incorrect; it must be > 0.0".to_string())
        );

        let mut config = Config::sample(4);
        config.elastic.bc.xlo[0] = BcType::Periodic;
        assert!(config.validate().unwrap().contains("periodic"));

        let mut config = Config::sample(4);
        config.elastic.bc.yhi[1] = BcType::Traction;
        assert!(config.validate().unwrap().contains("load ramp"));

        let mut config = Config::sample(4);
        config.control.dt = -1.0;
        assert!(config.validate().unwrap().starts_with("dt = -1.0"));
    }

    #[test]
    fn read_json_works() {
        let json = r#"{
            "grid": {"n_cell": [4, 2], "prob_lo": [0.0, 0.0], "prob_hi": [2.0, 1.0]},
            "ic": {"type": "ellipsoid", "center": [1.0, 0.5], "radius": [0.2, 0.05], "eps": 0.1},
            "crack": {"model": {"type": "constant", "gc": 1.0, "zeta": 0.1, "mobility": 1.0}},
            "material": {"model": "isotropic"},
            "elastic": {"bottom_solver": "bicgstab"},
            "loading": {"disp_step": 0.01, "max_disp": 0.05}
        }"#;
        fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
        let path = format!("{}/config_read_json_works.json", DEFAULT_TEST_DIR);
        fs::write(&path, json).unwrap();
        let config = Config::read_json(&path).unwrap();
        assert_eq!(config.grid.n_cell, [4, 2]);
        assert_eq!(config.loading.max_disp, 0.05);
        assert_eq!(config.validate(), None);

        let path = format!("{}/config_read_json_bad_solver.json", DEFAULT_TEST_DIR);
        fs::write(&path, json.replace("bicgstab", "gmres")).unwrap();
        assert_eq!(Config::read_json(&path).err(), Some("cannot parse JSON file"));

        assert_eq!(
            Config::read_json("/tmp/pfsim/__not_found__.json").err(),
            Some("cannot open file")
        );
    }
}
