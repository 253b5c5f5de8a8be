//! Inverse transform of recovered coefficients back to coordinate units.
//!
//! ## Steps
//!
//! 1. DCT-III of the frequency weights. The intercept (`weights[0]`) has no
//!    frequency of its own and is dropped; its offset is recovered by step 3.
//! 2. Scale by `1 / sqrt(sampling_ratio * N / 2)`.
//! 3. Bias correction: the mean residual between the known standardized
//!    measurements and the reconstruction at the sampled positions is added
//!    to every position.
//! 4. Destandardize with the block's channel statistics.

use nalgebra::DVector;

use crate::error::{Result, SensingError};
use crate::math::dct::DctPlan;
use crate::math::stats::{mean, ChannelStatistics};
use crate::sampler::SamplingPlan;

/// Reconstruct one channel of a block at every position.
///
/// # Arguments
///
/// * `plan` - Transform plan for the block length
/// * `weights` - Solver output: intercept followed by one weight per frequency
/// * `sampling` - Positions that were measured
/// * `sampled_standardized` - Standardized measurements, aligned with `sampling`
/// * `stats` - Statistics used to standardize the measurements
/// * `sampling_ratio` - Configured fraction of measured positions
///
/// # Errors
///
/// Returns an error on mismatched lengths or if the result is not finite.
pub fn reconstruct_channel(
    plan: &DctPlan,
    weights: &DVector<f64>,
    sampling: &SamplingPlan,
    sampled_standardized: &[f64],
    stats: &ChannelStatistics,
    sampling_ratio: f64,
) -> Result<Vec<f64>> {
    let n = plan.len();
    if weights.len() != n + 1 {
        return Err(SensingError::invalid_config(format!(
            "expected {} weights, got {}",
            n + 1,
            weights.len()
        )));
    }
    if sampled_standardized.len() != sampling.len() {
        return Err(SensingError::invalid_config(format!(
            "{} measurements for {} sampled positions",
            sampled_standardized.len(),
            sampling.len()
        )));
    }

    let mut signal = plan.dct3(&weights.as_slice()[1..]);

    let scale = 1.0 / (sampling_ratio * 0.5 * n as f64).sqrt();
    for v in &mut signal {
        *v *= scale;
    }

    let residuals: Vec<f64> = sampling
        .positions()
        .iter()
        .zip(sampled_standardized.iter())
        .map(|(&p, &known)| known - signal[p])
        .collect();
    let bias = mean(&residuals);

    for v in &mut signal {
        *v += bias;
    }
    let values = stats.destandardize(&signal);

    if values.iter().any(|v| !v.is_finite()) {
        return Err(SensingError::numerical_instability(
            "reconstructed channel contains non-finite values",
        ));
    }

    Ok(values)
}
