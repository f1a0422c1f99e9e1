//! Transverse Mercator projection on the WGS84 ellipsoid.
//!
//! This projection backs the UTM zones used by ASTER L1T products and most
//! target grids. The series expansions follow Snyder, "Map Projections: A
//! Working Manual" (USGS PP 1395), equations 8-5 to 8-25, which are accurate
//! to well under a meter within a UTM zone.
//!
//! The projection parameters include:
//! - Central meridian (lon0)
//! - Scale factor on the central meridian (k0, 0.9996 for UTM)
//! - False easting / northing (500 km / 0 or 10 000 km for UTM)

use std::f64::consts::PI;

use crate::{WGS84_A, WGS84_INV_F};

/// Longitudes further than this from the central meridian are rejected.
const MAX_MERIDIAN_OFFSET_DEG: f64 = 30.0;

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    /// Central meridian in radians
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// False easting (meters)
    pub false_easting: f64,
    /// False northing (meters)
    pub false_northing: f64,
    /// Ellipsoid semi-major axis (meters)
    pub a: f64,
    /// First eccentricity squared
    e2: f64,
    /// Second eccentricity squared
    ep2: f64,
}

impl TransverseMercator {
    /// Create a projection on the WGS84 ellipsoid.
    pub fn new(lon0_deg: f64, k0: f64, false_easting: f64, false_northing: f64) -> Self {
        let f = 1.0 / WGS84_INV_F;
        let e2 = f * (2.0 - f);

        Self {
            lon0: lon0_deg.to_radians(),
            k0,
            false_easting,
            false_northing,
            a: WGS84_A,
            e2,
            ep2: e2 / (1.0 - e2),
        }
    }

    /// Create the projection for a WGS84 UTM zone (1-60).
    pub fn utm(zone: u8, north: bool) -> Self {
        let lon0 = zone as f64 * 6.0 - 183.0;
        let false_northing = if north { 0.0 } else { 10_000_000.0 };
        Self::new(lon0, 0.9996, 500_000.0, false_northing)
    }

    /// Central meridian in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        self.lon0.to_degrees()
    }

    /// Meridian arc length from the equator to latitude `phi` (radians).
    fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }

    /// Convert geographic coordinates (degrees) to projected (easting, northing).
    ///
    /// Returns None outside the usable band around the central meridian.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() || lat_deg.abs() > 90.0 {
            return None;
        }

        let phi = lat_deg.to_radians();
        let dlon = normalize_lon(lon_deg.to_radians() - self.lon0);
        if dlon.abs() > MAX_MERIDIAN_OFFSET_DEG.to_radians() {
            return None;
        }

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = self.a / (1.0 - self.e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = self.ep2 * cos_phi * cos_phi;
        let a = dlon * cos_phi;
        let m = self.meridian_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = self.k0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0);
        let y = self.k0
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6 / 720.0));

        Some((x + self.false_easting, y + self.false_northing))
    }

    /// Convert projected (easting, northing) to geographic coordinates (degrees).
    pub fn inverse(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        if !easting.is_finite() || !northing.is_finite() {
            return None;
        }

        let x = easting - self.false_easting;
        let y = northing - self.false_northing;

        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        // Footpoint latitude
        let m = y / self.k0;
        let mu = m / (self.a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        if phi1.abs() >= PI / 2.0 {
            return None;
        }

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let c1 = self.ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let denom = 1.0 - e2 * sin_phi1 * sin_phi1;
        let n1 = self.a / denom.sqrt();
        let r1 = self.a * (1.0 - e2) / denom.powf(1.5);
        let d = x / (n1 * self.k0);
        // The series diverges far from the central meridian
        if d.abs() > MAX_MERIDIAN_OFFSET_DEG.to_radians() {
            return None;
        }

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_phi1;

        Some((normalize_lon(lon).to_degrees(), phi.to_degrees()))
    }
}

/// Normalize a longitude difference to [-π, π].
fn normalize_lon(lon: f64) -> f64 {
    (lon + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_central_meridian() {
        let proj = TransverseMercator::utm(33, true);
        assert_eq!(proj.central_meridian_deg(), 15.0);

        let proj = TransverseMercator::utm(22, false);
        assert!((proj.central_meridian_deg() - (-51.0)).abs() < 1e-12);
    }

    #[test]
    fn test_equator_on_central_meridian() {
        let proj = TransverseMercator::utm(33, true);
        let (e, n) = proj.forward(15.0, 0.0).unwrap();
        assert!((e - 500_000.0).abs() < 1e-6, "easting {}", e);
        assert!(n.abs() < 1e-6, "northing {}", n);
    }

    #[test]
    fn test_known_northing_at_45n() {
        // UTM northing of 45°N on the central meridian is 4 982 950.4 m
        let proj = TransverseMercator::utm(31, true);
        let (e, n) = proj.forward(3.0, 45.0).unwrap();
        assert!((e - 500_000.0).abs() < 1e-6);
        assert!((n - 4_982_950.4).abs() < 1.0, "northing {}", n);
    }

    #[test]
    fn test_southern_hemisphere_false_northing() {
        let proj = TransverseMercator::utm(22, false);
        let (_, n) = proj.forward(-51.0, -24.0).unwrap();
        assert!(n > 7_000_000.0 && n < 7_500_000.0, "northing {}", n);
    }

    #[test]
    fn test_roundtrip() {
        let proj = TransverseMercator::utm(22, false);
        for &(lon, lat) in &[(-51.0, -24.0), (-49.3, -24.6), (-53.9, -20.1), (-48.1, -30.5)] {
            let (e, n) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(e, n).unwrap();
            assert!((lon - lon2).abs() < 1e-7, "lon roundtrip {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-7, "lat roundtrip {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_far_from_zone_rejected() {
        let proj = TransverseMercator::utm(33, true);
        assert!(proj.forward(100.0, 10.0).is_none());
        assert!(proj.forward(f64::NAN, 10.0).is_none());
    }

    #[test]
    fn test_far_easting_rejected() {
        let proj = TransverseMercator::utm(22, false);
        assert!(proj.inverse(1.0e13, 7.0e6).is_none());
        assert!(proj.inverse(-1.0e300, 7.0e6).is_none());
        assert!(proj.inverse(5.0e6, 7.0e6).is_none());
    }

    #[test]
    fn test_huge_longitude_is_normalized() {
        let proj = TransverseMercator::utm(33, true);
        for lon in [1.0e300, -1.0e18, 7.0e16] {
            if let Some((e, n)) = proj.forward(lon, 10.0) {
                assert!(e.is_finite() && n.is_finite());
            }
        }

        let wrapped = proj.forward(15.0 + 360.0 * 3.0, 10.0).unwrap();
        let direct = proj.forward(15.0, 10.0).unwrap();
        assert!((wrapped.0 - direct.0).abs() < 1e-3);
        assert!((wrapped.1 - direct.1).abs() < 1e-3);
    }

    #[test]
    fn test_normalize_lon() {
        assert!((normalize_lon(3.0 * PI) + PI).abs() < 1e-12);
        assert!((normalize_lon(-0.5) + 0.5).abs() < 1e-15);
        assert!(normalize_lon(1.0e20).abs() <= PI);
        assert!(normalize_lon(f64::NAN).is_nan());
    }
}
