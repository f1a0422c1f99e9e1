//! Spherical Web Mercator (EPSG:3857).

use std::f64::consts::PI;

use crate::WGS84_A;

/// Latitude limit of the square Web Mercator world (degrees).
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Web Mercator projection on a sphere of radius WGS84_A.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WebMercator;

impl WebMercator {
    /// Convert geographic coordinates (degrees) to Web Mercator meters.
    ///
    /// Returns None beyond the latitude limit.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() || lat_deg.abs() > MAX_LATITUDE {
            return None;
        }

        let x = WGS84_A * lon_deg.to_radians();
        let y = WGS84_A * (PI / 4.0 + lat_deg.to_radians() / 2.0).tan().ln();
        Some((x, y))
    }

    /// Convert Web Mercator meters to geographic coordinates (degrees).
    pub fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let lon = (x / WGS84_A).to_degrees();
        let lat = (2.0 * (y / WGS84_A).exp().atan() - PI / 2.0).to_degrees();
        Some((lon, lat))
    }
}
