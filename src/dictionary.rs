//! Partial cosine dictionary for one block.
//!
//! Row `k` is the orthonormal DCT-II of the unit impulse at the `k`-th sampled
//! position, i.e. the spectral signature of a single measurement. Columns are
//! DCT frequencies `0..block_length`. The Lasso fit uses the rows as its
//! design matrix and returns one weight per column.

use nalgebra::DMatrix;

use crate::error::{Result, SensingError};
use crate::math::dct::DctPlan;
use crate::sampler::SamplingPlan;

/// `block_samples x block_length` design matrix, row-major by sampled position.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    matrix: DMatrix<f64>,
}

impl Dictionary {
    /// Build the dictionary rows for the positions of `sampling`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan and the transform disagree on the block length.
    pub fn build(plan: &DctPlan, sampling: &SamplingPlan) -> Result<Self> {
        let n = plan.len();
        if sampling.block_length() != n {
            return Err(SensingError::invalid_config(format!(
                "sampling plan covers {} positions, transform has {n}",
                sampling.block_length()
            )));
        }

        let mut matrix = DMatrix::zeros(sampling.len(), n);
        let mut impulse = vec![0.0; n];

        for (row, &p) in sampling.positions().iter().enumerate() {
            impulse[p] = 1.0;
            let spectrum = plan.dct2_orthonormal(&impulse);
            impulse[p] = 0.0;

            for (col, v) in spectrum.into_iter().enumerate() {
                matrix[(row, col)] = v;
            }
        }

        Ok(Self { matrix })
    }

    /// Underlying design matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of rows (sampled positions).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns (frequencies).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.matrix.ncols()
    }
}
