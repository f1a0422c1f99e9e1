//! Error types for grid harmonization.

use projection::ProjectionError;
use std::fmt;
use thiserror::Error;

/// Which raster of a resampling call an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterRole {
    Native,
    Target,
}

impl fmt::Display for RasterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterRole::Native => write!(f, "native"),
            RasterRole::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur while resampling a band.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarmonizeError {
    /// The affine transform has no inverse.
    #[error("{raster} transform is not invertible (determinant {determinant})")]
    DegenerateTransform { raster: RasterRole, determinant: f64 },

    /// A CRS identifier does not resolve to a supported projection.
    #[error(transparent)]
    CrsResolutionFailed(#[from] ProjectionError),

    /// The value buffer does not match the declared raster shape.
    #[error("{raster} raster {width}x{height} expects {expected} values, got {actual}")]
    ShapeMismatch {
        raster: RasterRole,
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

impl HarmonizeError {
    /// Create a DegenerateTransform error.
    pub fn degenerate(raster: RasterRole, determinant: f64) -> Self {
        Self::DegenerateTransform {
            raster,
            determinant,
        }
    }
}

/// Result type for harmonization operations.
pub type Result<T> = std::result::Result<T, HarmonizeError>;
