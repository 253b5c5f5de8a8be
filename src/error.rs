//! Error types for track reconstruction.
//!
//! Every failure is fatal to the operation that raised it. The engine never
//! retries a block and never substitutes default parameters.

use thiserror::Error;

/// Coordinate channel of a geographic sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Latitude in degrees.
    Latitude,
    /// Longitude in degrees.
    Longitude,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => f.write_str("latitude"),
            Self::Longitude => f.write_str("longitude"),
        }
    }
}

/// Main error type for track reconstruction.
#[derive(Error, Debug)]
pub enum SensingError {
    /// No samples were supplied.
    #[error("Empty input: no samples to reconstruct")]
    EmptyInput,

    /// Algorithm parameters are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raw user-entered setting was rejected.
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// The sampled subset of a block has zero variance in one channel.
    #[error("Degenerate block {block}: sampled {channel} values have zero variance")]
    DegenerateBlock { block: usize, channel: Channel },

    /// Numerical computation resulted in NaN or Inf.
    #[error("Numerical instability: {context}")]
    NumericalInstability { context: String },
}

/// Result type alias for track reconstruction.
pub type Result<T> = std::result::Result<T, SensingError>;

impl SensingError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid setting error.
    #[must_use]
    pub fn invalid_setting(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }

    /// Create a degenerate block error.
    #[must_use]
    pub const fn degenerate_block(block: usize, channel: Channel) -> Self {
        Self::DegenerateBlock { block, channel }
    }

    /// Create a numerical instability error.
    #[must_use]
    pub fn numerical_instability(context: impl Into<String>) -> Self {
        Self::NumericalInstability {
            context: context.into(),
        }
    }

    /// Whether the error comes from parameters rather than from the data.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::InvalidSetting { .. })
    }
}
