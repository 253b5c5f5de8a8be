//! DCT-II / DCT-III transforms backed by FFT plans.
//!
//! Both transforms are computed through a length `2N` FFT of the mirrored
//! signal. A [`DctPlan`] is built once per block length and is read-only
//! afterwards, so it can be shared by every block of a path.
//!
//! Conventions (unnormalized):
//! - DCT-II: `X[k] = sum_n x[n] * cos(pi * k * (2n + 1) / (2N))`
//! - DCT-III: `y[n] = x[0] / 2 + sum_{k>=1} x[k] * cos(pi * k * (2n + 1) / (2N))`
//!
//! With these definitions `dct3(dct2(x)) == x * N / 2`.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::error::{Result, SensingError};

/// Precomputed forward/inverse FFT plans and twiddles for one transform length.
#[derive(Clone)]
pub struct DctPlan {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    /// `exp(-i * pi * k / (2N))` for `k < N`.
    twiddles: Vec<Complex64>,
}

impl fmt::Debug for DctPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DctPlan").field("len", &self.len).finish_non_exhaustive()
    }
}

impl DctPlan {
    /// Plan transforms of length `len`.
    ///
    /// # Errors
    ///
    /// Returns an error if `len` is zero.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SensingError::invalid_config("transform length must be positive"));
        }

        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(2 * len);
        let inverse = planner.plan_fft_inverse(2 * len);

        let twiddles = (0..len)
            .map(|k| Complex64::from_polar(1.0, -PI * k as f64 / (2.0 * len as f64)))
            .collect();

        Ok(Self {
            len,
            forward,
            inverse,
            twiddles,
        })
    }

    /// Transform length `N`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false; a plan has at least one point.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unnormalized DCT-II of `signal`.
    #[must_use]
    pub fn dct2(&self, signal: &[f64]) -> Vec<f64> {
        debug_assert_eq!(signal.len(), self.len);
        let n = self.len;

        // Even extension: x[0..N] followed by x reversed
        let mut buffer: Vec<Complex64> = signal
            .iter()
            .chain(signal.iter().rev())
            .map(|&x| Complex64::new(x, 0.0))
            .collect();

        self.forward.process(&mut buffer);

        (0..n)
            .map(|k| 0.5 * (buffer[k] * self.twiddles[k]).re)
            .collect()
    }

    /// Orthonormal DCT-II: `dct2` scaled by `sqrt(1/N)` on the DC term and `sqrt(2/N)` elsewhere.
    #[must_use]
    pub fn dct2_orthonormal(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = self.dct2(signal);
        for (k, v) in out.iter_mut().enumerate() {
            *v *= self.orthonormal_scale(k);
        }
        out
    }

    /// Unnormalized DCT-III of `coeffs`, with half weight on the DC term.
    #[must_use]
    pub fn dct3(&self, coeffs: &[f64]) -> Vec<f64> {
        debug_assert_eq!(coeffs.len(), self.len);
        let n = self.len;

        let mut buffer = vec![Complex64::new(0.0, 0.0); 2 * n];
        for (k, (&c, tw)) in coeffs.iter().zip(self.twiddles.iter()).enumerate() {
            let weight = if k == 0 { 0.5 * c } else { c };
            buffer[k] = tw.conj() * weight;
        }

        self.inverse.process(&mut buffer);

        buffer.iter().take(n).map(|c| c.re).collect()
    }

    /// Orthonormal scaling factor for frequency `k`.
    #[must_use]
    pub fn orthonormal_scale(&self, k: usize) -> f64 {
        if k == 0 {
            (1.0 / self.len as f64).sqrt()
        } else {
            (2.0 / self.len as f64).sqrt()
        }
    }
}
