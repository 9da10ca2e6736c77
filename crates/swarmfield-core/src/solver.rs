use crate::error::{EngineError, Result};
use crate::fields::FieldState;
use crate::sparse::CsrMatrix;
use crate::species::Species;

const CG_MAX_ITERS: usize = 500;
const CG_TOLERANCE: f64 = 1e-10;

/// Evolves each species' field row over one `dt` by operator splitting:
/// an implicit diffusion solve followed by explicit decay. Any direct or
/// iterative sparse solver is valid per spec; this uses conjugate gradient
/// against `I - dt*D*A` applied lazily (the matrix itself is never
/// materialized — only `A`'s matvec is needed).
pub struct FieldSolver<'a> {
    laplacian: &'a CsrMatrix,
}

impl<'a> FieldSolver<'a> {
    pub fn new(laplacian: &'a CsrMatrix) -> Self {
        Self { laplacian }
    }

    pub fn step(&self, species: &[Species], fields: &mut FieldState, dt: f64) -> Result<()> {
        for (k, sp) in species.iter().enumerate() {
            let rhs = fields.row(k).to_vec();
            let u_prime = if sp.diffusion == 0.0 {
                rhs
            } else {
                self.solve_implicit_diffusion(sp.diffusion, dt, &rhs, k)?
            };

            let row = fields.row_mut(k);
            for (p, u) in row.iter_mut().enumerate() {
                let decayed = u_prime[p] - dt * sp.decay * u_prime[p];
                if !decayed.is_finite() {
                    return Err(EngineError::SolverDivergence { species: k });
                }
                *u = decayed;
            }
        }
        Ok(())
    }

    /// Solves `(I - dt*D*A) u' = rhs` via conjugate gradient. `A` is
    /// symmetric negative semi-definite, so `I - dt*D*A` is symmetric
    /// positive definite for `dt, D >= 0`, and CG converges monotonically.
    fn solve_implicit_diffusion(
        &self,
        diffusion: f64,
        dt: f64,
        rhs: &[f64],
        species_idx: usize,
    ) -> Result<Vec<f64>> {
        let n = rhs.len();
        let coeff = dt * diffusion;

        let apply = |x: &[f64], out: &mut [f64]| {
            let mut ax = vec![0.0; n];
            self.laplacian.matvec(x, &mut ax);
            for i in 0..n {
                out[i] = x[i] - coeff * ax[i];
            }
        };

        let mut u = rhs.to_vec();
        let mut ax = vec![0.0; n];
        apply(&u, &mut ax);

        let mut r: Vec<f64> = rhs.iter().zip(&ax).map(|(b, a)| b - a).collect();
        let mut p = r.clone();
        let mut rs_old: f64 = r.iter().map(|v| v * v).sum();

        if rs_old.sqrt() < CG_TOLERANCE {
            return Ok(u);
        }

        for _ in 0..CG_MAX_ITERS {
            apply(&p, &mut ax);
            let p_ax: f64 = p.iter().zip(&ax).map(|(a, b)| a * b).sum();
            if p_ax == 0.0 {
                break;
            }
            let alpha = rs_old / p_ax;

            for i in 0..n {
                u[i] += alpha * p[i];
                r[i] -= alpha * ax[i];
            }

            let rs_new: f64 = r.iter().map(|v| v * v).sum();
            if rs_new.sqrt() < CG_TOLERANCE {
                break;
            }

            let beta = rs_new / rs_old;
            for i in 0..n {
                p[i] = r[i] + beta * p[i];
            }
            rs_old = rs_new;
        }

        if u.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::SolverDivergence {
                species: species_idx,
            });
        }

        let residual: f64 = rs_old.sqrt();
        if residual >= CG_TOLERANCE {
            log::warn!(
                "conjugate gradient did not converge for species {species_idx} within {CG_MAX_ITERS} iterations (residual {residual:e})"
            );
        }

        Ok(u)
    }
}
