//! Conversion of user-entered parameter text into a validated configuration.
//!
//! Settings forms hand over raw strings. [`RawSettings::parse`] applies the
//! entry rules of the settings screen on top of [`SensingConfig::validate`]:
//!
//! | Field | Rule |
//! |-------|------|
//! | `iterations` | integer in `(0, 2000)` |
//! | `block_length` | positive even integer |
//! | `sampling_ratio` | number in `(0, 1]` |
//! | `l1_penalty` | number `> 0` |

use serde::{Deserialize, Serialize};

use crate::config::SensingConfig;
use crate::error::{Result, SensingError};

/// Exclusive upper bound on the iteration count accepted from user input.
pub const MAX_ITERATIONS_EXCLUSIVE: usize = 2000;

/// Raw text of the settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettings {
    /// Solver sweep limit per channel.
    pub iterations: String,
    /// Samples per block.
    pub block_length: String,
    /// Fraction of each block kept as measurements.
    pub sampling_ratio: String,
    /// L1 penalty of the sparse fit.
    pub l1_penalty: String,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            iterations: "512".to_owned(),
            block_length: "64".to_owned(),
            sampling_ratio: "0.5".to_owned(),
            l1_penalty: "0.01".to_owned(),
        }
    }
}

impl RawSettings {
    /// Parse and validate into a [`SensingConfig`] with the default tolerance and no seed.
    ///
    /// # Errors
    ///
    /// Returns [`SensingError::InvalidSetting`] naming the first rejected field.
    pub fn parse(&self) -> Result<SensingConfig> {
        let max_iterations: usize = parse_field("iterations", &self.iterations)?;
        if max_iterations == 0 || max_iterations >= MAX_ITERATIONS_EXCLUSIVE {
            return Err(SensingError::invalid_setting(
                "iterations",
                format!("must be between 1 and {}", MAX_ITERATIONS_EXCLUSIVE - 1),
            ));
        }

        let block_length: usize = parse_field("block_length", &self.block_length)?;
        if block_length == 0 || block_length % 2 != 0 {
            return Err(SensingError::invalid_setting(
                "block_length",
                "must be a positive even number",
            ));
        }

        let sampling_ratio: f64 = parse_field("sampling_ratio", &self.sampling_ratio)?;
        if !(sampling_ratio > 0.0 && sampling_ratio <= 1.0) {
            return Err(SensingError::invalid_setting(
                "sampling_ratio",
                "must be in (0, 1]",
            ));
        }

        let l1_penalty: f64 = parse_field("l1_penalty", &self.l1_penalty)?;
        if !(l1_penalty.is_finite() && l1_penalty > 0.0) {
            return Err(SensingError::invalid_setting("l1_penalty", "must be positive"));
        }

        let config = SensingConfig {
            block_length,
            sampling_ratio,
            l1_penalty,
            max_iterations,
            ..SensingConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SensingError::invalid_setting(field, "is empty"));
    }
    trimmed.parse().map_err(|_| {
        SensingError::invalid_setting(field, format!("`{trimmed}` is not a valid number"))
    })
}
