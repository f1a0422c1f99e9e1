//! Resampling utilities for grid processing.
//!
//! This module handles the mapping of target cells into native rasters, the
//! interpolation of native values at the mapped positions and the
//! aggregation of native pixels covered by a target cell.

pub mod aggregate;
pub mod interpolation;
pub mod reproject;

pub use aggregate::{average_aggregate, mode_aggregate, PixelWindow};
pub use interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
