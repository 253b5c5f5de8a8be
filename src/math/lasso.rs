//! L1-regularized least squares via cyclic coordinate descent.
//!
//! Minimizes `||y - w0 - X w||^2 + l1_penalty * ||w||_1` where `w0` is an
//! unpenalized intercept. Each sweep visits the intercept first and then
//! every column of `X` in order, moving one coordinate to its exact optimum
//! with the others held fixed. For column `j`:
//!
//! ```text
//! rho_j = x_j . (r + w_j x_j)          r = current residual
//! w_j   = soft(rho_j / ||x_j||^2, l1_penalty / 2)
//! ```
//!
//! `rho_j / ||x_j||^2` is the least-squares optimum of `w_j` alone.
//! `soft(w, t)` shrinks it towards zero by `t` and clamps to exactly zero
//! inside `[-t, t]`, which is what makes the recovered spectrum sparse.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SensingError};

/// Coordinate-descent Lasso parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LassoSolver {
    /// Penalty on the L1 norm of the non-intercept weights. Zero gives plain least squares.
    pub l1_penalty: f64,
    /// Convergence threshold on the largest coordinate change of a sweep.
    pub tolerance: f64,
    /// Maximum number of sweeps.
    pub max_iterations: usize,
}

/// Outcome of one [`LassoSolver::fit`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoFit {
    /// Intercept at index 0, then one weight per feature column.
    pub weights: DVector<f64>,
    /// Number of sweeps performed.
    pub sweeps: usize,
    /// Whether the tolerance was reached before the sweep limit.
    pub converged: bool,
}

impl LassoFit {
    /// Intercept term.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.weights[0]
    }

    /// Feature weights without the intercept.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.weights.as_slice()[1..]
    }

    /// Number of feature weights that are not exactly zero.
    #[must_use]
    pub fn nonzero_count(&self) -> usize {
        self.coefficients().iter().filter(|w| **w != 0.0).count()
    }
}

/// Shrink `rho` towards zero by `threshold`.
#[inline]
#[must_use]
pub fn soft_threshold(rho: f64, threshold: f64) -> f64 {
    if rho < -threshold {
        rho + threshold
    } else if rho > threshold {
        rho - threshold
    } else {
        0.0
    }
}

impl LassoSolver {
    /// Create a solver.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero, `tolerance` is not
    /// positive, or `l1_penalty` is negative or non-finite.
    pub fn new(l1_penalty: f64, tolerance: f64, max_iterations: usize) -> Result<Self> {
        let solver = Self {
            l1_penalty,
            tolerance,
            max_iterations,
        };
        solver.validate()?;
        Ok(solver)
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SensingError::invalid_config(
                "max_iterations must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SensingError::invalid_config("tolerance must be positive"));
        }
        if !(self.l1_penalty.is_finite() && self.l1_penalty >= 0.0) {
            return Err(SensingError::invalid_config(
                "l1_penalty must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Fit weights for `target ~ w0 + features * w`, starting from `initial_weights`.
    ///
    /// `initial_weights` has one entry more than `features` has columns.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid solver parameters, mismatched shapes, or
    /// non-finite input.
    pub fn fit(
        &self,
        features: &DMatrix<f64>,
        target: &DVector<f64>,
        initial_weights: &DVector<f64>,
    ) -> Result<LassoFit> {
        self.validate()?;

        let (m, p) = features.shape();
        if m == 0 {
            return Err(SensingError::invalid_config("lasso needs at least one row"));
        }
        if target.len() != m {
            return Err(SensingError::invalid_config(format!(
                "target has {} rows, features have {m}",
                target.len()
            )));
        }
        if initial_weights.len() != p + 1 {
            return Err(SensingError::invalid_config(format!(
                "expected {} initial weights, got {}",
                p + 1,
                initial_weights.len()
            )));
        }
        if features.iter().chain(target.iter()).any(|v| !v.is_finite()) {
            return Err(SensingError::numerical_instability(
                "non-finite value in lasso input",
            ));
        }

        let threshold = self.l1_penalty / 2.0;
        let col_norms: Vec<f64> = features.column_iter().map(|c| c.norm_squared()).collect();

        let mut weights = initial_weights.clone();
        let coeffs = weights.rows(1, p).into_owned();
        let mut residual = (target - features * coeffs).add_scalar(-weights[0]);

        let mut sweeps = 0;
        let mut converged = false;

        while sweeps < self.max_iterations {
            sweeps += 1;
            let mut max_delta: f64 = 0.0;

            // Intercept: unpenalized mean of the partial residual
            let new_bias = weights[0] + residual.sum() / m as f64;
            let delta = new_bias - weights[0];
            if delta != 0.0 {
                residual.add_scalar_mut(-delta);
                weights[0] = new_bias;
            }
            max_delta = max_delta.max(delta.abs());

            for (j, &z) in col_norms.iter().enumerate() {
                let column = features.column(j);
                let old = weights[j + 1];
                let new = if z > 0.0 {
                    let rho = column.dot(&residual) + old * z;
                    soft_threshold(rho / z, threshold)
                } else {
                    0.0
                };
                let delta = new - old;
                if delta != 0.0 {
                    residual.axpy(-delta, &column, 1.0);
                    weights[j + 1] = new;
                }
                max_delta = max_delta.max(delta.abs());
            }

            if max_delta < self.tolerance {
                converged = true;
                break;
            }
        }

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(SensingError::numerical_instability(
                "lasso produced non-finite weights",
            ));
        }

        Ok(LassoFit {
            weights,
            sweeps,
            converged,
        })
    }
}
