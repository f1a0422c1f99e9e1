//! Coordinate reference system transformations.
//!
//! Implements the map projections used by ASTER L1T products and common
//! target grids in plain Rust, with no GIS library behind them:
//!
//! - EPSG:4326 geographic lon/lat
//! - EPSG:3857 Web Mercator
//! - EPSG:326zz / 327zz WGS84 UTM (Transverse Mercator)

pub mod error;
pub mod mercator;
pub mod transform;
pub mod transverse_mercator;

pub use error::{ProjectionError, Result};
pub use mercator::WebMercator;
pub use transform::{CrsTransformer, Projection};
pub use transverse_mercator::TransverseMercator;

/// WGS84 semi-major axis (meters)
pub const WGS84_A: f64 = 6378137.0;
/// WGS84 inverse flattening
pub const WGS84_INV_F: f64 = 298.257223563;
