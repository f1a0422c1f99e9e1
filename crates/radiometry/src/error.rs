//! Error types for radiometric calibration.

use aster_common::{BandId, GainCode, SensorSubsystem};
use thiserror::Error;

/// Errors that can occur while calibrating a band.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadiometryError {
    /// No coefficient row for this subsystem, band and gain.
    #[error("no calibration coefficient for {subsystem} band {band} at gain {gain}")]
    CalibrationNotFound {
        subsystem: SensorSubsystem,
        band: BandId,
        gain: GainCode,
    },

    /// No solar irradiance for this band (thermal bands have none).
    #[error("no solar irradiance for band {band}")]
    SolarConstantNotFound { band: BandId },

    /// Sun elevation outside (0, 90] degrees.
    #[error("invalid sun elevation {elevation_deg} degrees, expected (0, 90]")]
    InvalidGeometry { elevation_deg: f64 },

    /// Reflectance denominator is zero.
    #[error("degenerate reflectance denominator for band {band}: cos(zenith)={cos_zenith}, irradiance={irradiance}")]
    DivisionDegenerate {
        band: BandId,
        cos_zenith: f64,
        irradiance: f64,
    },

    /// A calibration table row was declared twice.
    #[error("duplicate calibration entry for band {band} (gain {gain:?})")]
    DuplicateEntry { band: BandId, gain: Option<GainCode> },

    /// A subsystem's no-data sentinel was declared twice.
    #[error("duplicate no-data declaration for the {subsystem} subsystem")]
    DuplicateNodata { subsystem: SensorSubsystem },

    /// A calibration table row names a band outside its subsystem.
    #[error("band {band} is not part of the {subsystem} subsystem")]
    SubsystemMismatch {
        band: BandId,
        subsystem: SensorSubsystem,
    },

    /// A coefficient or irradiance is not a finite number.
    #[error("invalid calibration value for band {band}: {value}")]
    InvalidValue { band: BandId, value: f64 },
}

/// Result type for radiometry operations.
pub type Result<T> = std::result::Result<T, RadiometryError>;
