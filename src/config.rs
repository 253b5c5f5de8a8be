//! Configuration for track reconstruction.
//!
//! This module provides the [`SensingConfig`] struct which centralizes the
//! algorithm parameters, along with presets for common acquisition rates.
//!
//! # Example
//!
//! ```
//! use track_sensing::SensingConfig;
//!
//! // Use default configuration
//! let config = SensingConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Use a preset and pin the sampler seed
//! let walking = SensingConfig::walking().with_seed(7);
//! assert_eq!(walking.block_samples(), 16);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SensingError};

/// Convergence tolerance of the coordinate-descent solver.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Configuration for block-wise compressed-sensing reconstruction.
///
/// # Core Parameters
///
/// - `block_length`: Number of consecutive samples reconstructed together.
/// - `sampling_ratio`: Fraction of each block kept as measurements.
/// - `l1_penalty`: Lasso penalty; higher values give sparser spectra.
/// - `max_iterations`: Upper bound on solver sweeps per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensingConfig {
    /// Samples per block. Trailing samples that do not fill a block are dropped.
    pub block_length: usize,

    /// Fraction of block positions retained, in `(0, 1]`.
    pub sampling_ratio: f64,

    /// L1 penalty of the Lasso fit. Must be positive.
    pub l1_penalty: f64,

    /// Maximum number of coordinate-descent sweeps.
    pub max_iterations: usize,

    /// Stop once no coordinate moves by more than this within one sweep.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Sampler seed. `None` draws a fresh seed from the OS on every call.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            block_length: 64,
            sampling_ratio: 0.5,
            l1_penalty: 0.01,
            max_iterations: 512,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl SensingConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pedestrian tracks: slow, smooth, one fix per second.
    #[must_use]
    pub fn walking() -> Self {
        Self {
            block_length: 32,
            sampling_ratio: 0.5,
            l1_penalty: 0.05,
            ..Self::default()
        }
    }

    /// Vehicle tracks: faster heading changes need more measurements per block.
    #[must_use]
    pub fn driving() -> Self {
        Self {
            block_length: 64,
            sampling_ratio: 0.75,
            l1_penalty: 0.01,
            ..Self::default()
        }
    }

    /// Densely sampled input where most of each block is kept.
    #[must_use]
    pub fn dense() -> Self {
        Self {
            block_length: 128,
            sampling_ratio: 0.9,
            l1_penalty: 0.005,
            max_iterations: 1024,
            ..Self::default()
        }
    }

    /// Set the block length.
    #[must_use]
    pub fn with_block_length(mut self, block_length: usize) -> Self {
        self.block_length = block_length;
        self
    }

    /// Set the sampling ratio.
    #[must_use]
    pub fn with_sampling_ratio(mut self, sampling_ratio: f64) -> Self {
        self.sampling_ratio = sampling_ratio;
        self
    }

    /// Set the L1 penalty.
    #[must_use]
    pub fn with_l1_penalty(mut self, l1_penalty: f64) -> Self {
        self.l1_penalty = l1_penalty;
        self
    }

    /// Set the sweep limit.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Pin the sampler seed for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of measured positions per block: `floor(block_length * sampling_ratio)`.
    #[must_use]
    pub fn block_samples(&self) -> usize {
        (self.block_length as f64 * self.sampling_ratio).floor() as usize
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.block_length == 0 {
            return Err(SensingError::invalid_config("block_length must be positive"));
        }
        if !(self.sampling_ratio > 0.0 && self.sampling_ratio <= 1.0) {
            return Err(SensingError::invalid_config(format!(
                "sampling_ratio must be in (0, 1], got {}",
                self.sampling_ratio
            )));
        }
        if !(self.l1_penalty.is_finite() && self.l1_penalty > 0.0) {
            return Err(SensingError::invalid_config(format!(
                "l1_penalty must be positive, got {}",
                self.l1_penalty
            )));
        }
        if self.max_iterations == 0 {
            return Err(SensingError::invalid_config(
                "max_iterations must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SensingError::invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        let block_samples = self.block_samples();
        if block_samples == 0 {
            return Err(SensingError::invalid_config(format!(
                "sampling_ratio {} keeps no samples of a {}-sample block",
                self.sampling_ratio, self.block_length
            )));
        }
        if block_samples > self.block_length {
            return Err(SensingError::invalid_config(format!(
                "block_samples {block_samples} exceeds block_length {}",
                self.block_length
            )));
        }
        Ok(())
    }
}
