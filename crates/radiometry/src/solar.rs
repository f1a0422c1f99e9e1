//! Solar geometry for top-of-atmosphere reflectance.

use aster_common::SceneGeometry;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{RadiometryError, Result};

/// Orbital eccentricity term of the Earth-Sun distance approximation.
const ECCENTRICITY: f64 = 0.01672;
/// Mean daily motion of the Earth around the Sun (degrees/day).
const DEGREES_PER_DAY: f64 = 0.9856;
/// Day of year of perihelion.
const PERIHELION_DOY: f64 = 4.0;

/// Resolved solar geometry of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarGeometry {
    /// Solar zenith angle (degrees), 90 - sun elevation
    pub solar_zenith_deg: f64,
    /// Earth-Sun distance (astronomical units)
    pub earth_sun_distance_au: f64,
    /// Day of year of the acquisition (1-366)
    pub day_of_year: u32,
}

impl SolarGeometry {
    pub fn from_scene(scene: &SceneGeometry) -> Result<Self> {
        resolve(scene.sun_elevation_deg, scene.acquisition_date)
    }

    pub fn solar_zenith_rad(&self) -> f64 {
        self.solar_zenith_deg.to_radians()
    }

    pub fn cos_solar_zenith(&self) -> f64 {
        self.solar_zenith_rad().cos()
    }
}

/// Resolve the solar zenith angle and Earth-Sun distance of an acquisition.
///
/// Fails with `InvalidGeometry` unless `0 < sun_elevation_deg <= 90`.
pub fn resolve(sun_elevation_deg: f64, acquisition_date: NaiveDate) -> Result<SolarGeometry> {
    if !sun_elevation_deg.is_finite() || sun_elevation_deg <= 0.0 || sun_elevation_deg > 90.0 {
        return Err(RadiometryError::InvalidGeometry {
            elevation_deg: sun_elevation_deg,
        });
    }

    let day_of_year = acquisition_date.ordinal();
    Ok(SolarGeometry {
        solar_zenith_deg: 90.0 - sun_elevation_deg,
        earth_sun_distance_au: earth_sun_distance(day_of_year),
        day_of_year,
    })
}

/// Earth-Sun distance in AU for a day of year.
///
/// `d = 1 - 0.01672 * cos(0.9856 * (doy - 4))`, angle in degrees.
pub fn earth_sun_distance(day_of_year: u32) -> f64 {
    let angle = (DEGREES_PER_DAY * (day_of_year as f64 - PERIHELION_DOY)).to_radians();
    1.0 - ECCENTRICITY * angle.cos()
}
