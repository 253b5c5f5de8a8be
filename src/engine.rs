//! Block-wise reconstruction of a full track.
//!
//! # Pipeline Overview
//!
//! For every full block of `block_length` samples, in chronological order:
//!
//! 1. Draw a random sampling plan of `block_samples` positions
//! 2. Standardize the sampled latitude and longitude values
//! 3. Build the partial DCT dictionary for the sampled positions
//! 4. Fit sparse spectra with the Lasso solver, one channel at a time
//! 5. Invert the transform, correct the bias and destandardize
//! 6. Score the block against the original samples
//!
//! Trailing samples that do not fill a block are dropped. The path error is
//! the sum of the block errors.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SensingConfig;
use crate::dictionary::Dictionary;
use crate::error::{Channel, Result, SensingError};
use crate::geo::{compute_reconstruction_error, Coordinate, GeoSample};
use crate::math::dct::DctPlan;
use crate::math::lasso::LassoSolver;
use crate::math::stats::{rms, ChannelStatistics};
use crate::reconstructor::reconstruct_channel;
use crate::sampler::SamplingPlan;

/// Reconstruction of one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructedBlock {
    /// One coordinate per block position.
    pub coordinates: Vec<Coordinate>,
    /// RMS of the summed latitude and longitude residuals.
    pub mse: f64,
}

/// Full result of a path reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathReconstruction {
    /// Reconstructed coordinates, `blocks * block_length` of them.
    pub coordinates: Vec<Coordinate>,
    /// Sum of the block errors.
    pub total_error: f64,
    /// Error of each block, in order.
    pub block_errors: Vec<f64>,
    /// Number of blocks processed.
    pub blocks: usize,
    /// Trailing samples that did not fill a block.
    pub dropped_samples: usize,
}

impl PathReconstruction {
    /// Average block error. Unlike `total_error`, this is divided by the block count.
    #[must_use]
    pub fn mean_block_error(&self) -> f64 {
        if self.blocks == 0 {
            0.0
        } else {
            self.total_error / self.blocks as f64
        }
    }

    /// Planar RMSE, in degrees, between the reconstruction and the samples it was built from.
    ///
    /// Only the first `coordinates.len()` samples are compared, since the
    /// trailing remainder is never reconstructed. Infinity if fewer samples
    /// are given than were reconstructed.
    #[must_use]
    pub fn deviation_from(&self, samples: &[GeoSample]) -> f64 {
        let Some(covered) = samples.get(..self.coordinates.len()) else {
            return f64::INFINITY;
        };
        let original: Vec<Coordinate> = covered.iter().map(GeoSample::coordinate).collect();
        compute_reconstruction_error(&original, &self.coordinates)
    }

    /// Split into `(coordinates, total_error)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Coordinate>, f64) {
        (self.coordinates, self.total_error)
    }
}

/// Read-only state shared by every block of one path: validated parameters and the transform plan.
#[derive(Debug, Clone)]
pub struct BlockContext {
    block_length: usize,
    block_samples: usize,
    sampling_ratio: f64,
    solver: LassoSolver,
    plan: DctPlan,
}

impl BlockContext {
    /// Validate `config` and plan the transforms for its block length.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &SensingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            block_length: config.block_length,
            block_samples: config.block_samples(),
            sampling_ratio: config.sampling_ratio,
            solver: LassoSolver::new(config.l1_penalty, config.tolerance, config.max_iterations)?,
            plan: DctPlan::new(config.block_length)?,
        })
    }

    /// Samples per block.
    #[must_use]
    pub const fn block_length(&self) -> usize {
        self.block_length
    }

    /// Measured positions per block.
    #[must_use]
    pub const fn block_samples(&self) -> usize {
        self.block_samples
    }

    /// Reconstruct one block.
    ///
    /// `index` only labels log lines and errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the block has the wrong length, a sampled channel
    /// is constant, or the reconstruction is not finite.
    pub fn compute_block<R: Rng + ?Sized>(
        &self,
        index: usize,
        block: &[GeoSample],
        rng: &mut R,
    ) -> Result<ReconstructedBlock> {
        if block.len() != self.block_length {
            return Err(SensingError::invalid_config(format!(
                "block {index} has {} samples, expected {}",
                block.len(),
                self.block_length
            )));
        }

        let lat: Vec<f64> = block.iter().map(|s| s.latitude).collect();
        let lon: Vec<f64> = block.iter().map(|s| s.longitude).collect();

        let sampling = SamplingPlan::draw(self.block_length, self.block_samples, rng)?;
        debug!(block = index, samples = sampling.len(), "random sampling");

        let (lat_z, lat_stats) = ChannelStatistics::standardize(&sampling.gather(&lat))
            .ok_or_else(|| SensingError::degenerate_block(index, Channel::Latitude))?;
        let (lon_z, lon_stats) = ChannelStatistics::standardize(&sampling.gather(&lon))
            .ok_or_else(|| SensingError::degenerate_block(index, Channel::Longitude))?;

        let dictionary = Dictionary::build(&self.plan, &sampling)?;
        debug!(
            block = index,
            rows = dictionary.rows(),
            columns = dictionary.columns(),
            "dictionary built"
        );

        let lat_est = self.solve_channel(
            index,
            Channel::Latitude,
            &dictionary,
            &sampling,
            &lat_z,
            &lat_stats,
        )?;
        let lon_est = self.solve_channel(
            index,
            Channel::Longitude,
            &dictionary,
            &sampling,
            &lon_z,
            &lon_stats,
        )?;

        let residuals: Vec<f64> = (0..self.block_length)
            .map(|i| (lat_est[i] - lat[i]) + (lon_est[i] - lon[i]))
            .collect();
        let mse = rms(&residuals);
        debug!(block = index, mse, "block reconstructed");

        let coordinates = lat_est
            .into_iter()
            .zip(lon_est)
            .map(Coordinate::from)
            .collect();

        Ok(ReconstructedBlock { coordinates, mse })
    }

    fn solve_channel(
        &self,
        index: usize,
        channel: Channel,
        dictionary: &Dictionary,
        sampling: &SamplingPlan,
        standardized: &[f64],
        stats: &ChannelStatistics,
    ) -> Result<Vec<f64>> {
        let target = DVector::from_column_slice(standardized);
        let initial = DVector::zeros(self.block_length + 1);
        let fit = self.solver.fit(dictionary.matrix(), &target, &initial)?;

        if fit.converged {
            debug!(
                block = index,
                %channel,
                sweeps = fit.sweeps,
                nonzero = fit.nonzero_count(),
                "lasso converged"
            );
        } else {
            warn!(
                block = index,
                %channel,
                sweeps = fit.sweeps,
                "lasso stopped at the sweep limit before converging"
            );
        }

        reconstruct_channel(
            &self.plan,
            &fit.weights,
            sampling,
            standardized,
            stats,
            self.sampling_ratio,
        )
    }
}

/// Reconstruct a track from its samples.
///
/// This is the main entry point. The sampler is seeded from `config.seed`
/// when set, otherwise from the OS.
///
/// # Returns
///
/// `(coordinates, total_error)` where `total_error` is the sum of the block errors.
///
/// # Errors
///
/// Returns an error if:
/// - `samples` is empty
/// - The configuration is invalid
/// - A block is degenerate or produces non-finite values
///
/// # Example
///
/// ```
/// use track_sensing::{reconstruct_path, GeoSample, SensingConfig};
///
/// let samples: Vec<GeoSample> = (0..20)
///     .map(|i| {
///         let t = f64::from(i);
///         GeoSample::new(46.5 + 1e-4 * t, 6.6 + 1e-4 * (0.3 * t).sin(), t)
///     })
///     .collect();
///
/// let config = SensingConfig::default()
///     .with_block_length(8)
///     .with_sampling_ratio(0.5)
///     .with_seed(42);
///
/// let (coordinates, total_error) = reconstruct_path(&samples, &config)?;
/// assert_eq!(coordinates.len(), 16);
/// assert!(total_error.is_finite());
/// # Ok::<(), track_sensing::SensingError>(())
/// ```
pub fn reconstruct_path(
    samples: &[GeoSample],
    config: &SensingConfig,
) -> Result<(Vec<Coordinate>, f64)> {
    reconstruct_path_detailed(samples, config).map(PathReconstruction::into_parts)
}

/// Like [`reconstruct_path`], but returns per-block errors and block counts as well.
///
/// # Errors
///
/// See [`reconstruct_path`].
pub fn reconstruct_path_detailed(
    samples: &[GeoSample],
    config: &SensingConfig,
) -> Result<PathReconstruction> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    reconstruct_path_with_rng(samples, config, &mut rng)
}

/// Reconstruct a track drawing sampling plans from `rng`. `config.seed` is ignored.
///
/// Blocks are processed in order; the first failing block aborts the whole
/// path so no partial output is returned.
///
/// # Errors
///
/// See [`reconstruct_path`].
pub fn reconstruct_path_with_rng<R: Rng + ?Sized>(
    samples: &[GeoSample],
    config: &SensingConfig,
    rng: &mut R,
) -> Result<PathReconstruction> {
    if samples.is_empty() {
        return Err(SensingError::EmptyInput);
    }

    let context = BlockContext::new(config)?;
    let block_length = context.block_length();
    let blocks = samples.len() / block_length;
    let dropped_samples = samples.len() % block_length;

    if blocks == 0 {
        warn!(
            samples = samples.len(),
            block_length, "path shorter than one block, nothing to reconstruct"
        );
    } else if dropped_samples > 0 {
        warn!(dropped_samples, "trailing samples do not fill a block and are dropped");
    }

    let mut coordinates = Vec::with_capacity(blocks * block_length);
    let mut block_errors = Vec::with_capacity(blocks);
    let mut total_error = 0.0;

    for (index, block) in samples.chunks_exact(block_length).enumerate() {
        let reconstructed = context.compute_block(index, block, rng)?;
        total_error += reconstructed.mse;
        block_errors.push(reconstructed.mse);
        coordinates.extend(reconstructed.coordinates);
    }

    let reconstruction = PathReconstruction {
        coordinates,
        total_error,
        block_errors,
        blocks,
        dropped_samples,
    };

    info!(
        blocks,
        block_length,
        block_samples = context.block_samples(),
        total_error,
        rmse = reconstruction.deviation_from(samples),
        "path reconstructed"
    );

    Ok(reconstruction)
}
