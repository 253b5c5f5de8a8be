//! Per-channel standardization.

use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of one channel's sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Population standard deviation (divides by `n`).
    pub std: f64,
}

impl ChannelStatistics {
    /// Compute statistics of `values`.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// Moments are accumulated relative to the first value, so a constant
    /// slice gives exactly that value as mean and exactly zero spread.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (&origin, _) = values.split_first()?;
        let n = values.len() as f64;
        let offset = values.iter().map(|v| v - origin).sum::<f64>() / n;
        let var = values
            .iter()
            .map(|v| (v - origin - offset).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            mean: origin + offset,
            std: var.sqrt(),
        })
    }

    /// Whether the statistics can be used to standardize: finite, strictly positive spread.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.mean.is_finite() && self.std.is_finite() && self.std > 0.0)
    }

    /// Standardize `values` to zero mean and unit variance.
    ///
    /// Returns `None` when the values are empty or have no spread.
    #[must_use]
    pub fn standardize(values: &[f64]) -> Option<(Vec<f64>, Self)> {
        let stats = Self::from_values(values)?;
        if stats.is_degenerate() {
            return None;
        }
        let standardized = values.iter().map(|&v| stats.apply(v)).collect();
        Some((standardized, stats))
    }

    /// `(value - mean) / std`
    #[inline]
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }

    /// `value * std + mean`
    #[inline]
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        value * self.std + self.mean
    }

    /// Map standardized values back to physical units.
    #[must_use]
    pub fn destandardize(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.invert(v)).collect()
    }
}

/// Root mean square of a sequence; zero for an empty slice.
#[must_use]
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Arithmetic mean; zero for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
