//! Track Sensing Library
//!
//! Compressed-sensing reconstruction of sparse, noisy GPS tracks.
//!
//! A track is cut into fixed-length blocks. Each block is randomly
//! subsampled, its latitude and longitude are fitted as sparse cosine
//! spectra with an L1-regularized regression, and the spectra are inverted
//! to give a dense, denoised estimate at every position of the block.
//!
//! # Features
//!
//! - **Block-wise**: Independent blocks, no state carried between them
//! - **Sparse**: Lasso coordinate descent drives small frequencies to zero
//! - **Reproducible**: Seedable sampler for deterministic runs
//! - **Validated**: Parameters are checked once, before any block is touched
//!
//! # Quick Start
//!
//! ```
//! use track_sensing::{reconstruct_path, GeoSample, SensingConfig};
//!
//! let samples: Vec<GeoSample> = (0..64)
//!     .map(|i| {
//!         let t = f64::from(i);
//!         GeoSample::new(46.52 + 1e-4 * t, 6.56 + 2e-4 * (0.1 * t).sin(), t)
//!     })
//!     .collect();
//!
//! let config = SensingConfig::walking().with_seed(42);
//! let (coordinates, total_error) = reconstruct_path(&samples, &config)?;
//!
//! assert_eq!(coordinates.len(), 64);
//! assert!(total_error.is_finite());
//! # Ok::<(), track_sensing::SensingError>(())
//! ```
//!
//! # Parameters
//!
//! | Parameter | Effect |
//! |-----------|--------|
//! | `block_length` | Samples reconstructed together; the remainder is dropped |
//! | `sampling_ratio` | Fraction of each block used as measurements |
//! | `l1_penalty` | Sparsity of the recovered spectrum |
//! | `max_iterations` | Solver sweep limit per channel |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod geo;
pub mod math;
pub mod reconstructor;
pub mod sampler;
pub mod settings;

// Re-exports for convenient access
pub use config::{SensingConfig, DEFAULT_TOLERANCE};
pub use dictionary::Dictionary;
pub use engine::{
    reconstruct_path, reconstruct_path_detailed, reconstruct_path_with_rng, BlockContext,
    PathReconstruction, ReconstructedBlock,
};
pub use error::{Channel, Result, SensingError};
pub use geo::{compute_reconstruction_error, Coordinate, GeoSample};
pub use math::{ChannelStatistics, DctPlan, LassoFit, LassoSolver};
pub use reconstructor::reconstruct_channel;
pub use sampler::SamplingPlan;
pub use settings::RawSettings;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
