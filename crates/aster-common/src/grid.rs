//! Target grid specification shared by every band of a run.

use serde::{Deserialize, Serialize};

use crate::{AffineTransform, BoundingBox, CrsCode, SceneError, SceneResult};

/// Output grid: shape, affine transform and CRS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    pub transform: AffineTransform,
    /// CRS identifier, e.g. "EPSG:32722"
    pub crs: String,
}

impl Grid {
    /// Create a grid, rejecting empty shapes.
    pub fn new(
        width: usize,
        height: usize,
        transform: AffineTransform,
        crs: impl Into<String>,
    ) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyShape { width, height });
        }
        Ok(Self {
            width,
            height,
            transform,
            crs: crs.into(),
        })
    }

    /// Grid covering `bbox` at a fixed pixel size, in the given CRS.
    ///
    /// The shape is rounded up so the whole box is covered.
    pub fn covering(bbox: &BoundingBox, resolution: f64, crs: CrsCode) -> SceneResult<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(SceneError::InvalidResolution(resolution));
        }
        let width = (bbox.width() / resolution).ceil() as usize;
        let height = (bbox.height() / resolution).ceil() as usize;
        let transform = AffineTransform::from_origin(bbox.min_x, bbox.max_y, resolution, resolution);
        Self::new(width, height, transform, crs.to_string())
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn bbox(&self) -> BoundingBox {
        self.transform.bounds(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_empty_shape() {
        let t = AffineTransform::default();
        assert!(Grid::new(0, 10, t, "EPSG:4326").is_err());
        assert!(Grid::new(10, 10, t, "EPSG:4326").is_ok());
    }

    #[test]
    fn test_covering_grid() {
        let bbox = BoundingBox::new(500000.0, 7000000.0, 501500.0, 7001490.0);
        let grid = Grid::covering(&bbox, 15.0, CrsCode::Utm { zone: 22, north: false }).unwrap();
        assert_eq!(grid.shape(), (100, 100));
        assert_eq!(grid.crs, "EPSG:32722");
        assert_eq!(grid.len(), 10_000);

        // Rounded up: the box top is 7001490, not a multiple of 15 above the bottom
        let (x, y) = grid.transform.pixel_center(0, 0);
        assert!((x - 500007.5).abs() < 1e-6);
        assert!((y - 7001482.5).abs() < 1e-6);
    }

    #[test]
    fn test_covering_rejects_bad_resolution() {
        let bbox = BoundingBox::new(500000.0, 7000000.0, 501500.0, 7001500.0);
        let crs = CrsCode::Utm { zone: 22, north: false };
        for resolution in [0.0, -15.0, f64::NAN, f64::INFINITY] {
            let err = Grid::covering(&bbox, resolution, crs).unwrap_err();
            assert!(
                matches!(err, SceneError::InvalidResolution(r) if r.to_bits() == resolution.to_bits()),
                "resolution {}",
                resolution
            );
        }
    }
}
