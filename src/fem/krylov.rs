use crate::StrError;
use russell_lab::{vec_copy, vec_inner, vec_norm, Norm, Vector};

/// Holds the results of an iterative linear solve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KrylovReport {
    /// Number of iterations
    pub iterations: usize,

    /// Euclidean norm of the final residual b - A x
    pub residual_norm: f64,

    /// Indicates whether the tolerance has been reached
    pub converged: bool,
}

/// Holds the stopping criteria of the iterative linear solvers
#[derive(Clone, Copy, Debug)]
pub struct KrylovParams {
    /// Relative tolerance (relative to the norm of the right-hand side)
    pub tol_rel: f64,

    /// Absolute tolerance
    pub tol_abs: f64,

    /// Maximum number of iterations
    pub max_iter: usize,

    /// Prints the residual norm at each iteration
    pub verbose: bool,
}

impl KrylovParams {
    /// Returns the tolerance for the residual norm
    fn tolerance(&self, b: &Vector) -> f64 {
        f64::max(self.tol_rel * vec_norm(b, Norm::Euc), self.tol_abs)
    }
}

/// Applies the inverse of the Jacobi (diagonal) preconditioner
#[inline]
fn precondition(z: &mut Vector, diag: &Vector, r: &Vector) {
    for i in 0..r.dim() {
        z[i] = if diag[i] != 0.0 { r[i] / diag[i] } else { r[i] };
    }
}

/// Prints the residual norm of an iteration
#[inline]
fn print_iteration(name: &str, it: usize, norm_r: f64, tol: f64) {
    let mark = if !norm_r.is_finite() {
        "😱"
    } else if norm_r <= tol {
        "✅"
    } else {
        "  "
    };
    println!("{:>10} {:>5} {:>10.2e}{} {:>10.2e}", name, it, norm_r, mark, tol);
}

/// Solves A x = b with the Jacobi-preconditioned conjugate gradient method
///
/// # Input
///
/// * `apply` -- computes `y = A x` given `(y, x)`; A must be symmetric positive-definite
/// * `diag` -- the diagonal of A
/// * `b` -- the right-hand side
///
/// # Output
///
/// * `x` -- the solution; its input value is the initial guess
///
/// A non-finite initial residual is reported as not converged and `x` is left untouched.
pub fn solve_pcg<F>(
    x: &mut Vector,
    apply: F,
    diag: &Vector,
    b: &Vector,
    params: &KrylovParams,
) -> Result<KrylovReport, StrError>
where
    F: Fn(&mut Vector, &Vector) -> Result<(), StrError>,
{
    let n = b.dim();
    let tol = params.tolerance(b);
    let mut r = Vector::new(n);
    let mut q = Vector::new(n);
    apply(&mut q, x)?;
    for i in 0..n {
        r[i] = b[i] - q[i];
    }
    let mut norm_r = vec_norm(&r, Norm::Euc);
    if params.verbose {
        print_iteration("pcg", 0, norm_r, tol);
    }
    if !norm_r.is_finite() {
        return Ok(KrylovReport {
            iterations: 0,
            residual_norm: norm_r,
            converged: false,
        });
    }
    if norm_r <= tol {
        return Ok(KrylovReport {
            iterations: 0,
            residual_norm: norm_r,
            converged: true,
        });
    }
    let mut z = Vector::new(n);
    precondition(&mut z, diag, &r);
    let mut p = Vector::new(n);
    vec_copy(&mut p, &z)?;
    let mut rz = vec_inner(&r, &z);
    for it in 1..=params.max_iter {
        apply(&mut q, &p)?;
        let pq = vec_inner(&p, &q);
        if pq == 0.0 || !pq.is_finite() {
            return Err("conjugate gradient breakdown (pᵀAp is zero or not finite)");
        }
        let alpha = rz / pq;
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * q[i];
        }
        norm_r = vec_norm(&r, Norm::Euc);
        if params.verbose {
            print_iteration("pcg", it, norm_r, tol);
        }
        if norm_r <= tol {
            return Ok(KrylovReport {
                iterations: it,
                residual_norm: norm_r,
                converged: true,
            });
        }
        precondition(&mut z, diag, &r);
        let rz_new = vec_inner(&r, &z);
        let beta = rz_new / rz;
        for i in 0..n {
            p[i] = z[i] + beta * p[i];
        }
        rz = rz_new;
    }
    Ok(KrylovReport {
        iterations: params.max_iter,
        residual_norm: norm_r,
        converged: false,
    })
}

/// Solves A x = b with the Jacobi-preconditioned biconjugate gradient stabilized method
///
/// See [solve_pcg] for the arguments; here A may be non-symmetric.
pub fn solve_bicgstab<F>(
    x: &mut Vector,
    apply: F,
    diag: &Vector,
    b: &Vector,
    params: &KrylovParams,
) -> Result<KrylovReport, StrError>
where
    F: Fn(&mut Vector, &Vector) -> Result<(), StrError>,
{
    let n = b.dim();
    let tol = params.tolerance(b);
    let mut r = Vector::new(n);
    let mut v = Vector::new(n);
    apply(&mut v, x)?;
    for i in 0..n {
        r[i] = b[i] - v[i];
    }
    let mut norm_r = vec_norm(&r, Norm::Euc);
    if params.verbose {
        print_iteration("bicgstab", 0, norm_r, tol);
    }
    if !norm_r.is_finite() {
        return Ok(KrylovReport {
            iterations: 0,
            residual_norm: norm_r,
            converged: false,
        });
    }
    if norm_r <= tol {
        return Ok(KrylovReport {
            iterations: 0,
            residual_norm: norm_r,
            converged: true,
        });
    }
    let mut r_hat = Vector::new(n);
    vec_copy(&mut r_hat, &r)?;
    let mut p = Vector::new(n);
    let mut y = Vector::new(n);
    let mut s = Vector::new(n);
    let mut z = Vector::new(n);
    let mut t = Vector::new(n);
    v.fill(0.0);
    let (mut rho, mut alpha, mut omega) = (1.0, 1.0, 1.0);
    for it in 1..=params.max_iter {
        let rho_new = vec_inner(&r_hat, &r);
        if rho_new == 0.0 || !rho_new.is_finite() {
            return Err("BiCGSTAB breakdown (ρ is zero or not finite)");
        }
        let beta = (rho_new / rho) * (alpha / omega);
        for i in 0..n {
            p[i] = r[i] + beta * (p[i] - omega * v[i]);
        }
        precondition(&mut y, diag, &p);
        apply(&mut v, &y)?;
        let den = vec_inner(&r_hat, &v);
        if den == 0.0 || !den.is_finite() {
            return Err("BiCGSTAB breakdown (r̂ᵀv is zero or not finite)");
        }
        alpha = rho_new / den;
        for i in 0..n {
            s[i] = r[i] - alpha * v[i];
        }
        let norm_s = vec_norm(&s, Norm::Euc);
        if norm_s <= tol {
            for i in 0..n {
                x[i] += alpha * y[i];
            }
            if params.verbose {
                print_iteration("bicgstab", it, norm_s, tol);
            }
            return Ok(KrylovReport {
                iterations: it,
                residual_norm: norm_s,
                converged: true,
            });
        }
        precondition(&mut z, diag, &s);
        apply(&mut t, &z)?;
        let tt = vec_inner(&t, &t);
        if tt == 0.0 || !tt.is_finite() {
            return Err("BiCGSTAB breakdown (tᵀt is zero or not finite)");
        }
        omega = vec_inner(&t, &s) / tt;
        for i in 0..n {
            x[i] += alpha * y[i] + omega * z[i];
            r[i] = s[i] - omega * t[i];
        }
        norm_r = vec_norm(&r, Norm::Euc);
        if params.verbose {
            print_iteration("bicgstab", it, norm_r, tol);
        }
        if norm_r <= tol {
            return Ok(KrylovReport {
                iterations: it,
                residual_norm: norm_r,
                converged: true,
            });
        }
        if omega == 0.0 {
            return Err("BiCGSTAB breakdown (ω is zero)");
        }
        rho = rho_new;
    }
    Ok(KrylovReport {
        iterations: params.max_iter,
        residual_norm: norm_r,
        converged: false,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
