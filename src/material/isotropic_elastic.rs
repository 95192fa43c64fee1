use crate::base::{DEFAULT_LAMBDA, DEFAULT_MU};
use russell_lab::vec_inner;
use russell_tensor::Tensor2;
use serde::{Deserialize, Serialize};

/// Implements a degradable linear isotropic elastic model (plane strain)
///
/// ```text
/// σ = λ tr(ε) I + 2μ ε
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct IsotropicElastic {
    /// Lamé λ parameter
    pub lambda: f64,

    /// Shear modulus μ
    pub mu: f64,
}

impl Default for IsotropicElastic {
    fn default() -> Self {
        IsotropicElastic {
            lambda: DEFAULT_LAMBDA,
            mu: DEFAULT_MU,
        }
    }
}

impl IsotropicElastic {
    /// Allocates a new instance
    ///
    /// **Note:** Non-positive (or non-finite) constants are replaced by the defaults and a warning is logged.
    pub fn new(lambda: f64, mu: f64) -> Self {
        if lambda > 0.0 && mu > 0.0 && lambda.is_finite() && mu.is_finite() {
            return IsotropicElastic { lambda, mu };
        }
        tracing::warn!(
            lambda,
            mu,
            "elastic constants must be positive; using λ = {} and μ = {}",
            DEFAULT_LAMBDA,
            DEFAULT_MU
        );
        IsotropicElastic::default()
    }

    /// Scales the moduli by the retained stiffness fraction (1 - loss)
    ///
    /// `loss` is clipped to [0, 1].
    pub fn degrade_modulus(&mut self, loss: f64) {
        let retained = 1.0 - f64::clamp(loss, 0.0, 1.0);
        self.lambda *= retained;
        self.mu *= retained;
    }

    /// Calculates the stress tensor
    ///
    /// Both tensors must use the same (symmetric) Mandel representation.
    pub fn stress(&self, sigma: &mut Tensor2, epsilon: &Tensor2) {
        let eps = epsilon.vector();
        let tr = eps[0] + eps[1] + eps[2];
        let sig = sigma.vector_mut();
        for i in 0..sig.dim() {
            sig[i] = 2.0 * self.mu * eps[i];
            if i < 3 {
                sig[i] += self.lambda * tr;
            }
        }
    }

    /// Calculates the strain energy density ½ σ:ε
    pub fn energy_density(&self, epsilon: &Tensor2) -> f64 {
        let mut sigma = Tensor2::new(epsilon.mandel());
        self.stress(&mut sigma, epsilon);
        0.5 * vec_inner(sigma.vector(), epsilon.vector())
    }

    /// Returns the Young's modulus and Poisson's coefficient
    pub fn young_poisson(&self) -> (f64, f64) {
        let (lambda, mu) = (self.lambda, self.mu);
        let young = mu * (3.0 * lambda + 2.0 * mu) / (lambda + mu);
        let poisson = lambda / (2.0 * (lambda + mu));
        (young, poisson)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::IsotropicElastic;
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2};

    #[test]
    fn new_resets_invalid_constants() {
        let model = IsotropicElastic::new(1.0, 2.0);
        assert_eq!(model.lambda, 1.0);
        assert_eq!(model.mu, 2.0);
        let model = IsotropicElastic::new(-1.0, 2.0);
        assert_eq!(model, IsotropicElastic::default());
        let model = IsotropicElastic::new(1.0, 0.0);
        assert_eq!(model.lambda, 410.0);
        assert_eq!(model.mu, 305.0);
    }

    #[test]
    fn degrade_modulus_works() {
        let mut model = IsotropicElastic::new(100.0, 50.0);
        model.degrade_modulus(0.25);
        assert_eq!(model.lambda, 75.0);
        assert_eq!(model.mu, 37.5);
        model.degrade_modulus(2.0);
        assert_eq!(model.lambda, 0.0);
        let mut model = IsotropicElastic::new(100.0, 50.0);
        model.degrade_modulus(-1.0);
        assert_eq!(model.mu, 50.0);
    }

    #[test]
    fn stress_and_energy_work() {
        let model = IsotropicElastic::new(2.0, 3.0);
        let mut eps = Tensor2::new(Mandel::Symmetric2D);
        eps.sym_set(0, 0, 0.1);
        eps.sym_set(1, 1, -0.2);
        eps.sym_set(0, 1, 0.05);
        let mut sig = Tensor2::new(Mandel::Symmetric2D);
        model.stress(&mut sig, &eps);
        let tr = -0.1;
        approx_eq(sig.get(0, 0), 2.0 * tr + 6.0 * 0.1, 1e-15);
        approx_eq(sig.get(1, 1), 2.0 * tr - 6.0 * 0.2, 1e-15);
        approx_eq(sig.get(2, 2), 2.0 * tr, 1e-15);
        approx_eq(sig.get(0, 1), 6.0 * 0.05, 1e-15);
        approx_eq(sig.get(1, 0), 6.0 * 0.05, 1e-15);

        // ½ σ:ε = ½ (σxx εxx + σyy εyy + 2 σxy εxy)
        let expected = 0.5 * (sig.get(0, 0) * 0.1 - sig.get(1, 1) * 0.2 + 2.0 * sig.get(0, 1) * 0.05);
        approx_eq(model.energy_density(&eps), expected, 1e-15);
    }

    #[test]
    fn young_poisson_works() {
        // E = 1000, ν = 0.25 → λ = 400, μ = 400
        let model = IsotropicElastic::new(400.0, 400.0);
        let (young, poisson) = model.young_poisson();
        approx_eq(young, 1000.0, 1e-12);
        approx_eq(poisson, 0.25, 1e-15);
    }
}
