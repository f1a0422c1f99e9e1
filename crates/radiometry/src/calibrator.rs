//! Scene-level calibration: table lookups plus resolved solar geometry.

use aster_common::{RawBand, SceneGeometry};

use crate::{
    calibrate, to_radiance, CalibratedBand, CalibrationTable, Quantity, Result, SolarGeometry,
};

/// Calibrates the bands of one scene against a shared table.
///
/// The solar geometry is resolved once at construction, so an invalid sun
/// elevation is reported before any band is processed.
#[derive(Debug, Clone, Copy)]
pub struct Calibrator<'a> {
    table: &'a CalibrationTable,
    geometry: SolarGeometry,
}

impl<'a> Calibrator<'a> {
    pub fn new(table: &'a CalibrationTable, scene: &SceneGeometry) -> Result<Self> {
        Ok(Self {
            table,
            geometry: SolarGeometry::from_scene(scene)?,
        })
    }

    pub fn geometry(&self) -> &SolarGeometry {
        &self.geometry
    }

    /// Calibrate one band to the requested quantity.
    pub fn calibrate(&self, band: &RawBand, quantity: Quantity) -> Result<CalibratedBand> {
        let coefficient = self.table.lookup(band.subsystem(), band.band, band.gain)?;
        match quantity {
            Quantity::Radiance => Ok(to_radiance(band, &coefficient)),
            Quantity::Reflectance => {
                let solar = self.table.solar_constant(band.band)?;
                calibrate(band, &coefficient, &self.geometry, solar)
            }
        }
    }
}
