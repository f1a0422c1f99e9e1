//! Radiometric calibration for ASTER Level 1T bands.
//!
//! Converts raw digital numbers into at-sensor spectral radiance using the
//! published unit conversion coefficients (UCC), then into top-of-atmosphere
//! reflectance using the solar geometry of the scene:
//!
//! ```text
//! L   = DN * scale + offset                     (W m-2 sr-1 um-1)
//! rho = pi * L * d^2 / (E_sun * cos(theta_z))   (dimensionless)
//! ```
//!
//! where `d` is the Earth-Sun distance in astronomical units, `E_sun` the
//! band's mean exo-atmospheric solar irradiance, and `theta_z` the solar
//! zenith angle.

pub mod calibrate;
pub mod calibrator;
pub mod error;
pub mod solar;
pub mod table;

pub use calibrate::{calibrate, to_radiance, CalibratedBand, Quantity};
pub use calibrator::Calibrator;
pub use error::{RadiometryError, Result};
pub use solar::{earth_sun_distance, resolve, SolarGeometry};
pub use table::{CalibrationCoefficient, CalibrationTable, CalibrationTableBuilder, SolarConstant};
