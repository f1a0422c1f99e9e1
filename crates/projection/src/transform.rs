//! CRS resolution and point transformation between two CRSs.

use aster_common::CrsCode;

use crate::{ProjectionError, Result, TransverseMercator, WebMercator};

/// A resolved CRS with its projection math.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Geographic lon/lat in degrees
    Geographic,
    WebMercator(WebMercator),
    TransverseMercator(TransverseMercator),
}

impl Projection {
    /// Resolve a CRS identifier such as "EPSG:32722".
    pub fn resolve(crs: &str) -> Result<Self> {
        let code = CrsCode::parse(crs)
            .map_err(|e| ProjectionError::resolution_failed(crs, e.to_string()))?;
        Ok(Self::from_code(code))
    }

    pub fn from_code(code: CrsCode) -> Self {
        match code {
            CrsCode::Epsg4326 => Projection::Geographic,
            CrsCode::Epsg3857 => Projection::WebMercator(WebMercator),
            CrsCode::Utm { zone, north } => {
                Projection::TransverseMercator(TransverseMercator::utm(zone, north))
            }
        }
    }

    /// Projected (x, y) to geographic (lon, lat) degrees.
    pub fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self {
            Projection::Geographic => {
                if x.is_finite() && y.is_finite() && y.abs() <= 90.0 {
                    Some((x, y))
                } else {
                    None
                }
            }
            Projection::WebMercator(p) => p.inverse(x, y),
            Projection::TransverseMercator(p) => p.inverse(x, y),
        }
    }

    /// Geographic (lon, lat) degrees to projected (x, y).
    pub fn from_geographic(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self {
            Projection::Geographic => {
                if lon.is_finite() && lat.is_finite() && lat.abs() <= 90.0 {
                    Some((lon, lat))
                } else {
                    None
                }
            }
            Projection::WebMercator(p) => p.forward(lon, lat),
            Projection::TransverseMercator(p) => p.forward(lon, lat),
        }
    }
}

/// Transforms points from a source CRS into a destination CRS.
///
/// When both identifiers resolve to the same CRS the transformer is an
/// identity and points pass through untouched.
#[derive(Debug, Clone)]
pub struct CrsTransformer {
    source: Projection,
    destination: Projection,
    identity: bool,
}

impl CrsTransformer {
    /// Resolve both CRS identifiers.
    pub fn new(source_crs: &str, destination_crs: &str) -> Result<Self> {
        let source = Projection::resolve(source_crs)?;
        let destination = Projection::resolve(destination_crs)?;
        let identity = source == destination;

        Ok(Self {
            source,
            destination,
            identity,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Transform one point. Returns None where either projection is undefined.
    pub fn transform(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.identity {
            return Some((x, y));
        }
        let (lon, lat) = self.source.to_geographic(x, y)?;
        self.destination.from_geographic(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Projection::resolve("EPSG:4326").unwrap(), Projection::Geographic);
        assert!(matches!(
            Projection::resolve("EPSG:32722").unwrap(),
            Projection::TransverseMercator(_)
        ));

        let err = Projection::resolve("EPSG:2193").unwrap_err();
        assert!(matches!(err, ProjectionError::CrsResolutionFailed { ref crs, .. } if crs == "EPSG:2193"));
    }

    #[test]
    fn test_identity_transformer() {
        let t = CrsTransformer::new("EPSG:32722", "epsg:32722").unwrap();
        assert!(t.is_identity());
        assert_eq!(t.transform(500123.25, 7300000.5), Some((500123.25, 7300000.5)));
    }

    #[test]
    fn test_geographic_to_utm_and_back() {
        let to_utm = CrsTransformer::new("EPSG:4326", "EPSG:32722").unwrap();
        let from_utm = CrsTransformer::new("EPSG:32722", "EPSG:4326").unwrap();
        assert!(!to_utm.is_identity());

        let (e, n) = to_utm.transform(-49.5, -24.5).unwrap();
        let (lon, lat) = from_utm.transform(e, n).unwrap();
        assert!((lon + 49.5).abs() < 1e-7);
        assert!((lat + 24.5).abs() < 1e-7);
    }

    #[test]
    fn test_utm_to_web_mercator() {
        let t = CrsTransformer::new("EPSG:32633", "EPSG:3857").unwrap();
        let (x, y) = t.transform(500_000.0, 0.0).unwrap();
        let expected_x = crate::WGS84_A * 15f64.to_radians();
        assert!((x - expected_x).abs() < 1e-3);
        assert!(y.abs() < 1e-3);
    }

    #[test]
    fn test_unresolvable_crs() {
        assert!(CrsTransformer::new("EPSG:4326", "EPSG:1234").is_err());
        assert!(CrsTransformer::new("garbage", "EPSG:4326").is_err());
    }

    #[test]
    fn test_far_outside_zone_returns_none() {
        let from_utm = CrsTransformer::new("EPSG:32722", "EPSG:4326").unwrap();
        assert_eq!(from_utm.transform(1.0e13, 7.0e6), None);
        assert_eq!(from_utm.transform(-1.0e13, 7.0e6), None);

        let to_utm = CrsTransformer::new("EPSG:4326", "EPSG:32722").unwrap();
        let (e, n) = to_utm.transform(-51.0 + 360.0e6, -30.0).unwrap();
        let (e0, n0) = to_utm.transform(-51.0, -30.0).unwrap();
        assert!((e - e0).abs() < 1.0 && (n - n0).abs() < 1.0);
    }
}
