//! Error types for scene inputs.

use thiserror::Error;

/// Result type alias using SceneError.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while validating band, grid and scene inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    // === Band identity ===
    #[error("Unknown band label: {0}")]
    UnknownBand(String),

    #[error("Band {band} does not belong to the {subsystem} subsystem")]
    SubsystemMismatch { band: String, subsystem: String },

    #[error("Unknown gain code: {0}")]
    UnknownGain(String),

    // === Raster shape ===
    #[error("Raster shape {width}x{height} expects {expected} values, got {actual}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Raster shape must be non-empty, got {width}x{height}")]
    EmptyShape { width: usize, height: usize },

    // === Georeferencing ===
    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    #[error("Pixel size must be positive and finite, got {0}")]
    InvalidResolution(f64),

    #[error("Affine transform is not invertible (determinant {determinant})")]
    DegenerateTransform { determinant: f64 },

    // === Scene metadata ===
    #[error("Missing metadata key: {0}")]
    MissingMetadata(String),

    #[error("Invalid metadata value for '{key}': {value}")]
    InvalidMetadata { key: String, value: String },
}

impl SceneError {
    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            key: key.into(),
            value: value.into(),
        }
    }
}
