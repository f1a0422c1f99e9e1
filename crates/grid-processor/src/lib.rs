//! Geometric harmonization of band rasters.
//!
//! Every band arrives on its own native grid (15, 30 or 90 m, usually in
//! geographic coordinates). This crate resamples a band onto one target
//! [`Grid`], so all bands of a scene line up pixel for pixel.
//!
//! # Architecture
//!
//! ```text
//! target cell (col, row)
//!      │
//!      ├─► target affine: cell center → target CRS (x, y)
//!      │
//!      ├─► CRS transform (skipped when both CRSs are equal)
//!      │         target CRS → lon/lat → native CRS
//!      │
//!      ├─► native inverse affine: (x, y) → fractional native pixel
//!      │
//!      └─► sample with the requested method
//!               │
//!               ├─► inside native footprint: nearest / bilinear / cubic,
//!               │   or average / mode over the pixels under the cell corners
//!               │
//!               └─► outside: no-data value
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{resample, ResamplingMethod, SourceRaster};
//!
//! let source = SourceRaster::new(&band.data, band.width, band.height, band.transform, &band.crs);
//! let values = resample(&source, &grid, ResamplingMethod::Bilinear, f32::NAN)?;
//! assert_eq!(values.len(), grid.len());
//! ```

pub mod error;
pub mod projection;
pub mod types;

// Re-export commonly used types at crate root
pub use aster_common::Grid;
pub use error::{HarmonizeError, RasterRole, Result};
pub use self::projection::reproject::{resample, SourceRaster};
pub use self::projection::{
    average_aggregate, bilinear_interpolate, cubic_interpolate, mode_aggregate,
    nearest_interpolate, PixelWindow,
};
pub use types::ResamplingMethod;
