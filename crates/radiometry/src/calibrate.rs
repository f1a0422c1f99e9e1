//! Digital number to radiance and reflectance conversion.

use aster_common::{AffineTransform, BandId, RawBand};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::{CalibrationCoefficient, RadiometryError, Result, SolarConstant, SolarGeometry};

/// Smallest usable cosine of the solar zenith angle.
const MIN_COS_ZENITH: f64 = 1e-12;

/// Physical quantity carried by calibrated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// At-sensor spectral radiance (W m-2 sr-1 um-1)
    Radiance,
    /// Top-of-atmosphere reflectance (dimensionless)
    #[default]
    Reflectance,
}

impl Quantity {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "radiance" => Some(Self::Radiance),
            "reflectance" | "toa" => Some(Self::Reflectance),
            _ => None,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Radiance => write!(f, "radiance"),
            Self::Reflectance => write!(f, "reflectance"),
        }
    }
}

/// Calibrated values on the band's native grid.
///
/// No-data pixels are NaN. Values are never clipped, so reflectance above 1
/// or below 0 from noise or saturation is kept.
#[derive(Debug, Clone)]
pub struct CalibratedBand {
    pub band: BandId,
    pub quantity: Quantity,
    /// Values in row-major order (top row first)
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub transform: AffineTransform,
    pub crs: String,
}

impl CalibratedBand {
    /// Number of pixels holding an observation.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Convert a band's digital numbers to at-sensor radiance.
pub fn to_radiance(band: &RawBand, coefficient: &CalibrationCoefficient) -> CalibratedBand {
    let data = band
        .data
        .iter()
        .map(|&dn| coefficient.radiance(dn).map_or(f32::NAN, |l| l as f32))
        .collect();

    finish(band, Quantity::Radiance, data)
}

/// Convert a band's digital numbers to top-of-atmosphere reflectance.
///
/// `rho = pi * L * d^2 / (E_sun * cos(theta_z))`
pub fn calibrate(
    band: &RawBand,
    coefficient: &CalibrationCoefficient,
    geometry: &SolarGeometry,
    solar: SolarConstant,
) -> Result<CalibratedBand> {
    let cos_zenith = geometry.cos_solar_zenith();
    let irradiance = solar.irradiance();
    if cos_zenith.abs() < MIN_COS_ZENITH || !(irradiance > 0.0) {
        return Err(RadiometryError::DivisionDegenerate {
            band: band.band,
            cos_zenith,
            irradiance,
        });
    }

    let d2 = geometry.earth_sun_distance_au * geometry.earth_sun_distance_au;
    let factor = PI * d2 / (irradiance * cos_zenith);

    let data = band
        .data
        .iter()
        .map(|&dn| {
            coefficient
                .radiance(dn)
                .map_or(f32::NAN, |l| (l * factor) as f32)
        })
        .collect();

    Ok(finish(band, Quantity::Reflectance, data))
}

fn finish(band: &RawBand, quantity: Quantity, data: Vec<f32>) -> CalibratedBand {
    let calibrated = CalibratedBand {
        band: band.band,
        quantity,
        data,
        width: band.width,
        height: band.height,
        transform: band.transform,
        crs: band.crs.clone(),
    };

    debug!(
        band = %band.band,
        gain = %band.gain,
        quantity = %quantity,
        width = band.width,
        height = band.height,
        valid = calibrated.valid_count(),
        "Calibrated band"
    );

    calibrated
}
