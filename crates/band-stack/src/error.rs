//! Error types for band stack assembly.

use aster_common::BandId;
use grid_processor::HarmonizeError;
use radiometry::RadiometryError;
use thiserror::Error;

/// Failure of one band's calibration or resampling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandError {
    #[error(transparent)]
    Radiometry(#[from] RadiometryError),

    #[error(transparent)]
    Harmonize(#[from] HarmonizeError),
}

/// Errors that abort the assembly of a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// The scene's solar geometry is not physical; no band was processed.
    #[error("scene geometry rejected: {0}")]
    Geometry(#[source] RadiometryError),

    /// One band failed; the stack is discarded.
    #[error("band {band}: {source}")]
    Band {
        band: BandId,
        #[source]
        source: BandError,
    },

    #[error("band {0} supplied more than once")]
    DuplicateBand(BandId),

    #[error("scene has no bands to assemble")]
    EmptyScene,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl AssemblyError {
    /// Wrap a per-band failure with the band it belongs to.
    pub fn band(band: BandId, source: impl Into<BandError>) -> Self {
        Self::Band {
            band,
            source: source.into(),
        }
    }

    /// Band the error refers to, if any.
    pub fn band_id(&self) -> Option<BandId> {
        match self {
            Self::Band { band, .. } | Self::DuplicateBand(band) => Some(*band),
            _ => None,
        }
    }
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;
