//! Six-coefficient affine transforms between pixel and CRS coordinates.
//!
//! Follows the GDAL/rasterio convention: pixel (0, 0) is the outer corner of
//! the top-left pixel, so the center of pixel (col, row) is at
//! (col + 0.5, row + 0.5).
//!
//! ```text
//! x = a * col + b * row + c
//! y = d * col + e * row + f
//! ```

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, SceneError, SceneResult};

/// Relative tolerance under which a determinant is treated as zero.
const SINGULAR_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// North-up transform from the top-left corner and pixel sizes.
    pub fn from_origin(west: f64, north: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self::new(pixel_width, 0.0, west, 0.0, -pixel_height, north)
    }

    /// North-up transform that spans `bounds` with `width` x `height` pixels.
    pub fn from_bounds(
        west: f64,
        south: f64,
        east: f64,
        north: f64,
        width: usize,
        height: usize,
    ) -> Self {
        Self::from_origin(
            west,
            north,
            (east - west) / width as f64,
            (north - south) / height as f64,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Whether this transform has an inverse.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        let scale = (self.a * self.e).abs() + (self.b * self.d).abs();
        det.is_finite() && scale.is_finite() && det.abs() > SINGULAR_TOLERANCE * scale
    }

    /// Map pixel coordinates (col, row) to CRS coordinates (x, y).
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// CRS coordinates of the center of pixel (col, row).
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Inverse transform, mapping CRS coordinates back to pixel coordinates.
    pub fn invert(&self) -> SceneResult<Self> {
        if !self.is_invertible() {
            return Err(SceneError::DegenerateTransform {
                determinant: self.determinant(),
            });
        }

        let det = self.determinant();
        let ia = self.e / det;
        let ib = -self.b / det;
        let id = -self.d / det;
        let ie = self.a / det;

        Ok(Self::new(
            ia,
            ib,
            -(ia * self.c + ib * self.f),
            id,
            ie,
            -(id * self.c + ie * self.f),
        ))
    }

    /// Compose two transforms: the result applies `inner` first, then `self`.
    pub fn then_after(&self, inner: &AffineTransform) -> Self {
        Self::new(
            self.a * inner.a + self.b * inner.d,
            self.a * inner.b + self.b * inner.e,
            self.a * inner.c + self.b * inner.f + self.c,
            self.d * inner.a + self.e * inner.d,
            self.d * inner.b + self.e * inner.e,
            self.d * inner.c + self.e * inner.f + self.f,
        )
    }

    /// Pixel size as (x resolution, y resolution), both positive.
    pub fn resolution(&self) -> (f64, f64) {
        (
            (self.a * self.a + self.d * self.d).sqrt(),
            (self.b * self.b + self.e * self.e).sqrt(),
        )
    }

    /// Extent covered by a `width` x `height` raster under this transform.
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];

        let mut bbox = BoundingBox::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for (x, y) in corners {
            bbox.min_x = bbox.min_x.min(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_x = bbox.max_x.max(x);
            bbox.max_y = bbox.max_y.max(y);
        }
        bbox
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds() {
        let t = AffineTransform::from_bounds(500000.0, 7000000.0, 501500.0, 7001500.0, 100, 100);
        assert!((t.a - 15.0).abs() < 1e-9);
        assert!((t.e + 15.0).abs() < 1e-9);
        assert_eq!(t.c, 500000.0);
        assert_eq!(t.f, 7001500.0);

        let (x, y) = t.pixel_center(0, 0);
        assert!((x - 500007.5).abs() < 1e-9);
        assert!((y - 7001492.5).abs() < 1e-9);
    }

    #[test]
    fn test_invert_roundtrip() {
        let t = AffineTransform::new(30.0, 2.0, 1000.0, -1.5, -30.0, 5000.0);
        let inv = t.invert().unwrap();
        let (x, y) = t.apply(12.25, 7.5);
        let (col, row) = inv.apply(x, y);
        assert!((col - 12.25).abs() < 1e-9);
        assert!((row - 7.5).abs() < 1e-9);

        let identity = inv.then_after(&t);
        assert!((identity.a - 1.0).abs() < 1e-12);
        assert!(identity.b.abs() < 1e-12);
        assert!(identity.c.abs() < 1e-9);
        assert!((identity.e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_transform() {
        let zero = AffineTransform::new(0.0, 0.0, 10.0, 0.0, 0.0, 20.0);
        assert!(matches!(
            zero.invert(),
            Err(SceneError::DegenerateTransform { .. })
        ));

        // Rows and columns collinear
        let collinear = AffineTransform::new(2.0, 4.0, 0.0, 1.0, 2.0, 0.0);
        assert!(!collinear.is_invertible());
    }

    #[test]
    fn test_bounds_and_resolution() {
        let t = AffineTransform::from_origin(0.0, 90.0, 30.0, 30.0);
        let bbox = t.bounds(50, 3);
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.max_x, 1500.0);
        assert_eq!(bbox.min_y, 0.0);
        assert_eq!(bbox.max_y, 90.0);
        assert_eq!(t.resolution(), (30.0, 30.0));
    }
}
