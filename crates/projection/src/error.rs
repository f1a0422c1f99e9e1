//! Error types for CRS resolution.

use thiserror::Error;

/// Errors that can occur while resolving or applying a projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The CRS identifier does not name a supported projection.
    #[error("cannot resolve CRS '{crs}': {reason}")]
    CrsResolutionFailed { crs: String, reason: String },
}

impl ProjectionError {
    /// Create a CrsResolutionFailed error.
    pub fn resolution_failed(crs: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CrsResolutionFailed {
            crs: crs.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
