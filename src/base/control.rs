use serde::{Deserialize, Serialize};

/// Defines the smallest allowed pseudo-time increment
pub const CONTROL_MIN_DT: f64 = 1e-15;

/// Holds the (pseudo-time loop) options to control the simulation
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Control {
    /// Pseudo-time increment of the explicit damage update
    pub dt: f64,

    /// Maximum number of steps
    pub max_step: usize,

    /// Pseudo-time ending the simulation
    pub stop_time: f64,

    /// Number of steps between calls to regrid (0 means never)
    pub regrid_int: usize,

    /// Prints one line per converged load increment
    pub verbose: bool,

    /// Prints one line per evolution step
    pub verbose_steps: bool,
}

impl Default for Control {
    fn default() -> Self {
        Control::new()
    }
}

impl Control {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Control {
            dt: 1e-4,
            max_step: 100_000,
            stop_time: f64::MAX,
            regrid_int: 0,
            verbose: true,
            verbose_steps: false,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if !(self.dt >= CONTROL_MIN_DT) {
            return Some(format!(
                "dt = {:?} is incorrect; it must be ≥ {:e}",
                self.dt, CONTROL_MIN_DT
            ));
        }
        if self.max_step < 1 {
            return Some(format!("max_step = {} is incorrect; it must be ≥ 1", self.max_step));
        }
        if !(self.stop_time > 0.0) {
            return Some(format!(
                "stop_time = {:?} is incorrect; it must be > 0.0",
                self.stop_time
            ));
        }
        None // all good
    }

    /// Prints the header of the table with load-increment and step data
    #[inline]
    pub fn print_header(&self) {
        if self.verbose || self.verbose_steps {
            println!("Legend:");
            println!("✅ : converged");
            println!("👍 : converging");
            println!("😱 : found NaN or Inf\n");
            println!(
                "{:>8} {:>13} {:>6} {:>13} {:>10} {:>10}  ",
                "step", "t", "load", "ramp", "Δc/c", "|R|"
            );
        }
    }

    /// Prints evolution-step data
    #[inline]
    pub fn print_step(&self, step: usize, t: f64, load_step: usize, ramp: f64, crack_rel_err: f64, tol: f64) {
        if !self.verbose_steps {
            return;
        }
        let mark = if !crack_rel_err.is_finite() {
            "😱"
        } else if crack_rel_err <= tol {
            "✅"
        } else {
            "👍"
        };
        println!(
            "{:>8} {:>13.6e} {:>6} {:>13.6e} {:>10.2e}{} {:>10}  ",
            step, t, load_step, ramp, crack_rel_err, mark, "."
        );
    }

    /// Prints data of a converged load increment
    #[inline]
    pub fn print_load_step(&self, step: usize, t: f64, load_step: usize, ramp: f64, norm_residual: f64) {
        if !self.verbose {
            return;
        }
        let mark = if norm_residual.is_finite() { "✅" } else { "😱" };
        println!(
            "{:>8} {:>13.6e} {:>6} {:>13.6e} {:>10} {:>10.2e}{}",
            step, t, load_step, ramp, ".", norm_residual, mark
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Control;

    #[test]
    fn new_works() {
        let control = Control::new();
        assert_eq!(control.dt, 1e-4);
        assert_eq!(control.max_step, 100_000);
        assert_eq!(control.stop_time, f64::MAX);
        assert_eq!(control.regrid_int, 0);
        assert_eq!(control.verbose, true);
        assert_eq!(control.verbose_steps, false);
    }

    #[test]
    fn deserialize_uses_defaults() {
        let control: Control = serde_json::from_str(r#"{"dt": 0.5, "verbose": false}"#).unwrap();
        assert_eq!(control.dt, 0.5);
        assert_eq!(control.verbose, false);
        assert_eq!(control.max_step, 100_000);
    }

    #[test]
    fn validate_works() {
        let mut control = Control::new();
        assert_eq!(control.validate(), None);

        control.dt = 0.0;
        assert_eq!(
            control.validate(),
            Some("dt = 0.0 is incorrect; it must be ≥ 1e-15".to_string())
        );
        control.dt = f64::NAN;
        assert!(control.validate().is_some());
        control.dt = 0.1;

        control.max_step = 0;
        assert_eq!(
            control.validate(),
            Some("max_step = 0 is incorrect; it must be ≥ 1".to_string())
        );
        control.max_step = 10;

        control.stop_time = -1.0;
        assert_eq!(
            control.validate(),
            Some("stop_time = -1.0 is incorrect; it must be > 0.0".to_string())
        );
    }
}
