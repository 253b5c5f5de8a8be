//! Numerical building blocks for track reconstruction.
//!
//! This module provides:
//! - [`dct`]: FFT-backed DCT-II / DCT-III plans
//! - [`lasso`]: coordinate-descent Lasso solver
//! - [`stats`]: per-channel standardization

pub mod dct;
pub mod lasso;
pub mod stats;

pub use dct::DctPlan;
pub use lasso::{soft_threshold, LassoFit, LassoSolver};
pub use stats::ChannelStatistics;
