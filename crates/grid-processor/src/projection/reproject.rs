//! Resampling of a native raster onto a target grid.
//!
//! Each target cell center is mapped back into the native raster and sampled
//! there (inverse mapping), so every target cell receives exactly one value.
//! Aggregating methods also map the cell corners back, and combine every
//! native pixel whose center lies between them.

use aster_common::{AffineTransform, Grid};
use projection::CrsTransformer;
use tracing::debug;

use super::interpolation::in_footprint;
use super::{
    average_aggregate, bilinear_interpolate, cubic_interpolate, mode_aggregate,
    nearest_interpolate, PixelWindow,
};
use crate::error::{HarmonizeError, RasterRole, Result};
use crate::types::ResamplingMethod;

/// Fractional indices closer than this to a pixel center are snapped onto it.
const SNAP_TOLERANCE: f64 = 1e-6;

/// A borrowed raster on its native grid.
#[derive(Debug, Clone, Copy)]
pub struct SourceRaster<'a> {
    /// Values in row-major order (top row first)
    pub data: &'a [f32],
    pub width: usize,
    pub height: usize,
    pub transform: AffineTransform,
    pub crs: &'a str,
}

impl<'a> SourceRaster<'a> {
    pub fn new(
        data: &'a [f32],
        width: usize,
        height: usize,
        transform: AffineTransform,
        crs: &'a str,
    ) -> Self {
        Self {
            data,
            width,
            height,
            transform,
            crs,
        }
    }
}

/// Maps target cell centers to native CRS coordinates.
enum CellMapping {
    /// Same CRS: target pixel space straight to native pixel space.
    Affine(AffineTransform),
    /// Different CRS: target pixel → target CRS → native CRS → native pixel.
    Reprojected {
        target: AffineTransform,
        transformer: CrsTransformer,
        native_inverse: AffineTransform,
    },
}

impl CellMapping {
    /// Native pixel coordinates of target pixel coordinates.
    fn native_pixel(&self, col: f64, row: f64) -> Option<(f64, f64)> {
        match self {
            CellMapping::Affine(t) => Some(t.apply(col, row)),
            CellMapping::Reprojected {
                target,
                transformer,
                native_inverse,
            } => {
                let (x, y) = target.apply(col, row);
                let (nx, ny) = transformer.transform(x, y)?;
                Some(native_inverse.apply(nx, ny))
            }
        }
    }

    /// Native pixels whose centers fall inside target cell (col, row).
    ///
    /// The window spans the native positions of the four cell corners, in
    /// pixel-center index space.
    fn cell_window(
        &self,
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    ) -> Option<PixelWindow> {
        let mut lo = (f64::INFINITY, f64::INFINITY);
        let mut hi = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (dc, dr) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            let (px, py) = self.native_pixel(col as f64 + dc, row as f64 + dr)?;
            let (x, y) = (snap(px - 0.5), snap(py - 0.5));
            lo = (lo.0.min(x), lo.1.min(y));
            hi = (hi.0.max(x), hi.1.max(y));
        }
        PixelWindow::enclosed(lo, hi, width, height)
    }
}

#[inline]
fn snap(v: f64) -> f64 {
    let rounded = v.round();
    if (v - rounded).abs() < SNAP_TOLERANCE {
        rounded
    } else {
        v
    }
}

/// Resample a native raster onto a target grid.
///
/// Target cells whose center falls outside the native footprint, or outside
/// the domain of either projection, receive `nodata`. Resampling a raster
/// onto its own grid returns it unchanged for every method.
///
/// `Average` and `Mode` skip NaN pixels and write `nodata` when a cell holds
/// none. A cell smaller than a native pixel takes the pixel under its center.
///
/// # Errors
/// * `ShapeMismatch` if `source.data` does not hold `width * height` values
/// * `DegenerateTransform` if either affine transform is not invertible
/// * `CrsResolutionFailed` if either CRS identifier is unsupported
pub fn resample(
    source: &SourceRaster<'_>,
    target: &Grid,
    method: ResamplingMethod,
    nodata: f32,
) -> Result<Vec<f32>> {
    let expected = source.width * source.height;
    if source.data.len() != expected || expected == 0 {
        return Err(HarmonizeError::ShapeMismatch {
            raster: RasterRole::Native,
            width: source.width,
            height: source.height,
            expected,
            actual: source.data.len(),
        });
    }

    let native_inverse = source
        .transform
        .invert()
        .map_err(|_| HarmonizeError::degenerate(RasterRole::Native, source.transform.determinant()))?;
    if !target.transform.is_invertible() {
        return Err(HarmonizeError::degenerate(
            RasterRole::Target,
            target.transform.determinant(),
        ));
    }

    let transformer = CrsTransformer::new(&target.crs, source.crs)?;
    if transformer.is_identity() {
        let native_bounds = source.transform.bounds(source.width, source.height);
        if !native_bounds.intersects(&target.bbox()) {
            debug!(
                source_crs = source.crs,
                target_width = target.width,
                target_height = target.height,
                "Target grid does not overlap the native raster"
            );
            return Ok(vec![nodata; target.width * target.height]);
        }
    }

    let mapping = if transformer.is_identity() {
        CellMapping::Affine(native_inverse.then_after(&target.transform))
    } else {
        CellMapping::Reprojected {
            target: target.transform,
            transformer,
            native_inverse,
        }
    };

    let mut output = vec![nodata; target.width * target.height];
    let mut filled = 0usize;

    for row in 0..target.height {
        for col in 0..target.width {
            let Some((px, py)) = mapping.native_pixel(col as f64 + 0.5, row as f64 + 0.5) else {
                continue;
            };

            // Pixel-edge space to pixel-center index space
            let x = snap(px - 0.5);
            let y = snap(py - 0.5);
            if !in_footprint(source.width, source.height, x, y) {
                continue;
            }

            let (data, width, height) = (source.data, source.width, source.height);
            let window = || {
                mapping
                    .cell_window(col, row, width, height)
                    .unwrap_or_else(|| PixelWindow::containing(x, y, width, height))
            };
            let value = match method {
                ResamplingMethod::Nearest => nearest_interpolate(data, width, height, x, y),
                ResamplingMethod::Bilinear => bilinear_interpolate(data, width, height, x, y),
                ResamplingMethod::Cubic => cubic_interpolate(data, width, height, x, y),
                ResamplingMethod::Average => average_aggregate(data, width, &window()),
                ResamplingMethod::Mode => mode_aggregate(data, width, &window()),
            };
            if !value.is_nan() {
                output[row * target.width + col] = value;
                filled += 1;
            }
        }
    }

    debug!(
        source_crs = source.crs,
        target_crs = %target.crs,
        source_width = source.width,
        source_height = source.height,
        target_width = target.width,
        target_height = target.height,
        method = %method,
        filled = filled,
        "Resampled raster"
    );

    Ok(output)
}
