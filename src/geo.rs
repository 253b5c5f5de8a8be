//! Geographic sample and coordinate types.

use serde::{Deserialize, Serialize};

use crate::math::stats::rms;

/// One timestamped position fix, as delivered by the acquisition source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Acquisition time in seconds.
    pub timestamp: f64,
}

impl GeoSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Position of the sample without its timestamp.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A reconstructed (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Squared planar distance in degrees². Good enough at track scale.
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat * dlat + dlon * dlon
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.latitude, c.longitude)
    }
}

/// Root mean square planar distance between two coordinate sequences, in degrees.
///
/// Returns infinity when the lengths differ and zero for empty input.
#[must_use]
pub fn compute_reconstruction_error(original: &[Coordinate], reconstructed: &[Coordinate]) -> f64 {
    if original.len() != reconstructed.len() {
        return f64::INFINITY;
    }
    let distances: Vec<f64> = original
        .iter()
        .zip(reconstructed)
        .map(|(o, r)| o.squared_distance(r).sqrt())
        .collect();
    rms(&distances)
}
