//! The assembled multi-band product.

use aster_common::{AffineTransform, BandId, Grid};
use radiometry::Quantity;

/// One resampled band on the target grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    pub band: BandId,
    /// Values in row-major order (top row first)
    pub data: Vec<f32>,
}

/// Bands of one scene on a shared grid, in canonical band order.
#[derive(Debug, Clone)]
pub struct BandStack {
    pub layers: Vec<StackLayer>,
    pub width: usize,
    pub height: usize,
    pub transform: AffineTransform,
    pub crs: String,
    pub quantity: Quantity,
    pub nodata: f32,
}

impl BandStack {
    pub(crate) fn new(
        layers: Vec<StackLayer>,
        grid: &Grid,
        quantity: Quantity,
        nodata: f32,
    ) -> Self {
        Self {
            layers,
            width: grid.width,
            height: grid.height,
            transform: grid.transform,
            crs: grid.crs.clone(),
            quantity,
            nodata,
        }
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Shape as (bands, rows, cols).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.layers.len(), self.height, self.width)
    }

    /// Band identifiers in stack order.
    pub fn bands(&self) -> Vec<BandId> {
        self.layers.iter().map(|l| l.band).collect()
    }

    /// Values of one band.
    pub fn band(&self, band: BandId) -> Option<&[f32]> {
        self.layers
            .iter()
            .find(|l| l.band == band)
            .map(|l| l.data.as_slice())
    }

    pub fn get(&self, band: BandId, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.band(band).map(|data| data[row * self.width + col])
    }

    pub fn is_nodata(&self, value: f32) -> bool {
        value.is_nan() || value == self.nodata
    }

    /// Fraction of cells of `band` holding an observation.
    pub fn coverage(&self, band: BandId) -> Option<f64> {
        let data = self.band(band)?;
        if data.is_empty() {
            return Some(0.0);
        }
        let valid = data.iter().filter(|&&v| !self.is_nodata(v)).count();
        Some(valid as f64 / data.len() as f64)
    }

    /// The grid every layer lives on.
    pub fn grid(&self) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            transform: self.transform,
            crs: self.crs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(2, 2, AffineTransform::from_origin(0.0, 0.0, 1.0, 1.0), "EPSG:32722").unwrap()
    }

    fn stack() -> BandStack {
        BandStack::new(
            vec![
                StackLayer {
                    band: BandId::B1,
                    data: vec![0.1, 0.2, f32::NAN, 0.4],
                },
                StackLayer {
                    band: BandId::B4,
                    data: vec![-1.0, -1.0, 0.5, 0.5],
                },
            ],
            &grid(),
            Quantity::Reflectance,
            -1.0,
        )
    }

    #[test]
    fn test_accessors() {
        let stack = stack();
        assert_eq!(stack.shape(), (2, 2, 2));
        assert_eq!(stack.bands(), vec![BandId::B1, BandId::B4]);
        assert_eq!(stack.get(BandId::B4, 0, 1), Some(0.5));
        assert_eq!(stack.get(BandId::B4, 2, 0), None);
        assert!(stack.band(BandId::B2).is_none());
        assert_eq!(stack.grid(), grid());
    }

    #[test]
    fn test_coverage_counts_nan_and_nodata() {
        let stack = stack();
        assert_eq!(stack.coverage(BandId::B1), Some(0.75));
        assert_eq!(stack.coverage(BandId::B4), Some(0.5));
        assert_eq!(stack.coverage(BandId::B9), None);
    }
}
