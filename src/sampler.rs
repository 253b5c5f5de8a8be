//! Random measurement positions within a block.

use rand::Rng;

use crate::error::{Result, SensingError};

/// Ascending, duplicate-free positions in `[0, block_length)` kept as measurements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingPlan {
    block_length: usize,
    positions: Vec<usize>,
}

impl SamplingPlan {
    /// Draw `block_samples` distinct positions uniformly at random.
    ///
    /// Uses a partial Fisher-Yates shuffle, so every subset of the requested
    /// size is equally likely.
    ///
    /// # Errors
    ///
    /// Returns an error if `block_samples` is zero or exceeds `block_length`.
    pub fn draw<R: Rng + ?Sized>(
        block_length: usize,
        block_samples: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if block_samples == 0 || block_samples > block_length {
            return Err(SensingError::invalid_config(format!(
                "cannot draw {block_samples} samples from a block of {block_length}"
            )));
        }

        let mut indices: Vec<usize> = (0..block_length).collect();
        for i in (block_length - block_samples..block_length).rev() {
            let j = rng.gen_range(0..=i);
            indices.swap(i, j);
        }

        let mut positions = indices.split_off(block_length - block_samples);
        positions.sort_unstable();

        Ok(Self {
            block_length,
            positions,
        })
    }

    /// Plan that measures every position of the block.
    #[must_use]
    pub fn full(block_length: usize) -> Self {
        Self {
            block_length,
            positions: (0..block_length).collect(),
        }
    }

    /// Sampled positions, ascending.
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of sampled positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Length of the block the plan was drawn for.
    #[must_use]
    pub const fn block_length(&self) -> usize {
        self.block_length
    }

    /// Values of `block` at the sampled positions, in plan order.
    #[must_use]
    pub fn gather(&self, block: &[f64]) -> Vec<f64> {
        debug_assert_eq!(block.len(), self.block_length);
        self.positions.iter().map(|&p| block[p]).collect()
    }
}
