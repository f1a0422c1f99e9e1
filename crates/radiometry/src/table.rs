//! Calibration lookup tables.
//!
//! A [`CalibrationTable`] holds one radiance conversion row per
//! (subsystem, band, gain) and one mean solar irradiance per reflective band.
//! Lookups never fall back to a neighbouring gain or band: a missing row is
//! an error.

use aster_common::{BandId, GainCode, SensorSubsystem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{RadiometryError, Result};

/// Digital number marking pixels without an observation in ASTER L1T.
pub const ASTER_NODATA_DN: u16 = 0;

/// Radiance conversion for one (subsystem, band, gain).
///
/// `radiance = dn * scale + offset`; digital numbers equal to `nodata` carry
/// no observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCoefficient {
    /// Radiance per count (W m-2 sr-1 um-1 per DN)
    pub scale: f64,
    /// Radiance offset (W m-2 sr-1 um-1)
    pub offset: f64,
    /// No-observation sentinel of the band's subsystem
    pub nodata: Option<u16>,
}

impl CalibrationCoefficient {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self {
            scale,
            offset,
            nodata: None,
        }
    }

    /// ASTER model: `L = (DN - 1) * UCC`.
    pub fn aster(ucc: f64) -> Self {
        Self::new(ucc, -ucc)
    }

    /// Radiance for one digital number, None for the no-data sentinel.
    #[inline]
    pub fn radiance(&self, dn: u16) -> Option<f64> {
        if self.nodata == Some(dn) {
            return None;
        }
        Some(dn as f64 * self.scale + self.offset)
    }
}

/// Mean exo-atmospheric solar spectral irradiance (W m-2 um-1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarConstant(pub f64);

impl SolarConstant {
    pub fn irradiance(&self) -> f64 {
        self.0
    }
}

/// Immutable calibration table, safe to share between threads.
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    coefficients: HashMap<(BandId, GainCode), CalibrationCoefficient>,
    irradiance: HashMap<BandId, SolarConstant>,
    nodata: HashMap<SensorSubsystem, u16>,
}

impl CalibrationTable {
    pub fn builder() -> CalibrationTableBuilder {
        CalibrationTableBuilder::default()
    }

    /// Coefficient row for a (subsystem, band, gain) triple.
    ///
    /// The subsystem's no-data sentinel is attached to the returned row.
    pub fn lookup(
        &self,
        subsystem: SensorSubsystem,
        band: BandId,
        gain: GainCode,
    ) -> Result<CalibrationCoefficient> {
        let not_found = || RadiometryError::CalibrationNotFound {
            subsystem,
            band,
            gain,
        };

        if band.subsystem() != subsystem {
            return Err(not_found());
        }

        let mut coefficient = *self.coefficients.get(&(band, gain)).ok_or_else(not_found)?;
        coefficient.nodata = self.nodata(subsystem);
        Ok(coefficient)
    }

    /// Solar irradiance for a reflective band.
    pub fn solar_constant(&self, band: BandId) -> Result<SolarConstant> {
        self.irradiance
            .get(&band)
            .copied()
            .ok_or(RadiometryError::SolarConstantNotFound { band })
    }

    pub fn nodata(&self, subsystem: SensorSubsystem) -> Option<u16> {
        self.nodata.get(&subsystem).copied()
    }

    /// Number of coefficient rows.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Published ASTER unit conversion coefficients and solar irradiances.
    ///
    /// Coefficients follow the ASTER User Handbook v2 (Table 5); irradiances
    /// are the Thome et al. values used for L1T reflectance. Band 3B shares
    /// the band 3N irradiance since both observe the same spectral window.
    /// Gain settings absent from the handbook (low gain 2 on VNIR) have no row.
    pub fn aster() -> Self {
        use BandId::*;
        use GainCode::*;
        use SensorSubsystem::*;

        // (band, [HGH, NOR, LO1, LO2])
        const REFLECTIVE_UCC: [(BandId, [Option<f64>; 4]); 10] = [
            (B1, [Some(0.676), Some(1.688), Some(2.25), None]),
            (B2, [Some(0.708), Some(1.415), Some(1.89), None]),
            (B3B, [Some(0.423), Some(0.862), Some(1.15), None]),
            (B3N, [Some(0.423), Some(0.862), Some(1.15), None]),
            (B4, [Some(0.1087), Some(0.2174), Some(0.2900), Some(0.2900)]),
            (B5, [Some(0.0348), Some(0.0696), Some(0.0925), Some(0.4090)]),
            (B6, [Some(0.0313), Some(0.0625), Some(0.0830), Some(0.3900)]),
            (B7, [Some(0.0299), Some(0.0597), Some(0.0795), Some(0.3320)]),
            (B8, [Some(0.0209), Some(0.0417), Some(0.0556), Some(0.2450)]),
            (B9, [Some(0.0159), Some(0.0318), Some(0.0424), Some(0.2650)]),
        ];
        const THERMAL_UCC: [(BandId, f64); 5] = [
            (B10, 0.006822),
            (B11, 0.006780),
            (B12, 0.006590),
            (B13, 0.005693),
            (B14, 0.005225),
        ];
        const IRRADIANCE: [(BandId, f64); 10] = [
            (B1, 1848.99),
            (B2, 1555.74),
            (B3B, 1119.47),
            (B3N, 1119.47),
            (B4, 231.25),
            (B5, 79.81),
            (B6, 74.99),
            (B7, 68.66),
            (B8, 59.74),
            (B9, 56.92),
        ];

        let mut coefficients = HashMap::new();
        for (band, row) in REFLECTIVE_UCC {
            for (gain, ucc) in [High, Normal, Low1, Low2].into_iter().zip(row) {
                if let Some(ucc) = ucc {
                    coefficients.insert((band, gain), CalibrationCoefficient::aster(ucc));
                }
            }
        }
        for (band, ucc) in THERMAL_UCC {
            coefficients.insert((band, Normal), CalibrationCoefficient::aster(ucc));
        }

        Self {
            coefficients,
            irradiance: IRRADIANCE
                .into_iter()
                .map(|(band, e)| (band, SolarConstant(e)))
                .collect(),
            nodata: [Vnir, Swir, Tir]
                .into_iter()
                .map(|s| (s, ASTER_NODATA_DN))
                .collect(),
        }
    }
}

/// Collects rows and validates them in [`CalibrationTableBuilder::build`].
#[derive(Debug, Default)]
pub struct CalibrationTableBuilder {
    coefficients: Vec<(SensorSubsystem, BandId, GainCode, CalibrationCoefficient)>,
    irradiance: Vec<(BandId, SolarConstant)>,
    nodata: Vec<(SensorSubsystem, u16)>,
}

impl CalibrationTableBuilder {
    pub fn coefficient(
        mut self,
        subsystem: SensorSubsystem,
        band: BandId,
        gain: GainCode,
        coefficient: CalibrationCoefficient,
    ) -> Self {
        self.coefficients.push((subsystem, band, gain, coefficient));
        self
    }

    pub fn irradiance(mut self, band: BandId, solar: SolarConstant) -> Self {
        self.irradiance.push((band, solar));
        self
    }

    /// Declare the no-observation digital number of a subsystem.
    pub fn nodata(mut self, subsystem: SensorSubsystem, dn: u16) -> Self {
        self.nodata.push((subsystem, dn));
        self
    }

    /// Validate and freeze the table.
    ///
    /// Fails on duplicate rows or sentinels, rows whose band does not belong to the stated
    /// subsystem, and non-finite values.
    pub fn build(self) -> Result<CalibrationTable> {
        let mut coefficients = HashMap::with_capacity(self.coefficients.len());
        for (subsystem, band, gain, coefficient) in self.coefficients {
            if band.subsystem() != subsystem {
                return Err(RadiometryError::SubsystemMismatch { band, subsystem });
            }
            for value in [coefficient.scale, coefficient.offset] {
                if !value.is_finite() {
                    return Err(RadiometryError::InvalidValue { band, value });
                }
            }
            if coefficients.insert((band, gain), coefficient).is_some() {
                return Err(RadiometryError::DuplicateEntry {
                    band,
                    gain: Some(gain),
                });
            }
        }

        let mut irradiance = HashMap::with_capacity(self.irradiance.len());
        for (band, solar) in self.irradiance {
            if !solar.0.is_finite() || solar.0 <= 0.0 {
                return Err(RadiometryError::InvalidValue {
                    band,
                    value: solar.0,
                });
            }
            if irradiance.insert(band, solar).is_some() {
                return Err(RadiometryError::DuplicateEntry { band, gain: None });
            }
        }

        let mut nodata = HashMap::with_capacity(self.nodata.len());
        for (subsystem, dn) in self.nodata {
            if nodata.insert(subsystem, dn).is_some() {
                return Err(RadiometryError::DuplicateNodata { subsystem });
            }
        }

        Ok(CalibrationTable {
            coefficients,
            irradiance,
            nodata,
        })
    }
}
