//! Sensor subsystems, spectral bands and raw digital-number rasters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AffineTransform, SceneError, SceneResult};

/// ASTER sub-sensors, ordered the way bands are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorSubsystem {
    /// Visible and near-infrared, 15 m
    Vnir,
    /// Short-wave infrared, 30 m
    Swir,
    /// Thermal infrared, 90 m
    Tir,
}

impl SensorSubsystem {
    pub const ALL: [SensorSubsystem; 3] = [Self::Vnir, Self::Swir, Self::Tir];

    /// Native ground sample distance in meters.
    pub fn resolution_m(&self) -> f64 {
        match self {
            Self::Vnir => 15.0,
            Self::Swir => 30.0,
            Self::Tir => 90.0,
        }
    }

    /// Whether bands of this subsystem measure reflected sunlight.
    pub fn is_reflective(&self) -> bool {
        !matches!(self, Self::Tir)
    }
}

impl fmt::Display for SensorSubsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vnir => "VNIR",
            Self::Swir => "SWIR",
            Self::Tir => "TIR",
        };
        write!(f, "{}", name)
    }
}

/// One ASTER spectral band.
///
/// Declaration order is the canonical stacking order: ascending subsystem,
/// then band within subsystem. `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BandId {
    B1,
    B2,
    /// Band 3 backward-looking (stereo)
    B3B,
    /// Band 3 nadir
    B3N,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    B11,
    B12,
    B13,
    B14,
}

impl BandId {
    /// All bands in canonical order.
    pub const ALL: [BandId; 15] = [
        Self::B1,
        Self::B2,
        Self::B3B,
        Self::B3N,
        Self::B4,
        Self::B5,
        Self::B6,
        Self::B7,
        Self::B8,
        Self::B9,
        Self::B10,
        Self::B11,
        Self::B12,
        Self::B13,
        Self::B14,
    ];

    /// Build a band from its subsystem and label, rejecting pairs that do not exist.
    pub fn new(subsystem: SensorSubsystem, label: &str) -> SceneResult<Self> {
        let band = Self::from_label(label)?;
        if band.subsystem() != subsystem {
            return Err(SceneError::SubsystemMismatch {
                band: band.label().to_string(),
                subsystem: subsystem.to_string(),
            });
        }
        Ok(band)
    }

    /// Parse a band label such as "1", "03N", "3b" or "B14".
    ///
    /// Leading zeros are ignored, so metadata labels like "01" resolve.
    pub fn from_label(label: &str) -> SceneResult<Self> {
        let normalized = label.trim().to_uppercase();
        let stripped = normalized.strip_prefix('B').unwrap_or(&normalized);
        let stripped = stripped.trim_start_matches('0');

        match stripped {
            "1" => Ok(Self::B1),
            "2" => Ok(Self::B2),
            "3B" => Ok(Self::B3B),
            "3N" => Ok(Self::B3N),
            "4" => Ok(Self::B4),
            "5" => Ok(Self::B5),
            "6" => Ok(Self::B6),
            "7" => Ok(Self::B7),
            "8" => Ok(Self::B8),
            "9" => Ok(Self::B9),
            "10" => Ok(Self::B10),
            "11" => Ok(Self::B11),
            "12" => Ok(Self::B12),
            "13" => Ok(Self::B13),
            "14" => Ok(Self::B14),
            _ => Err(SceneError::UnknownBand(label.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::B1 => "1",
            Self::B2 => "2",
            Self::B3B => "3B",
            Self::B3N => "3N",
            Self::B4 => "4",
            Self::B5 => "5",
            Self::B6 => "6",
            Self::B7 => "7",
            Self::B8 => "8",
            Self::B9 => "9",
            Self::B10 => "10",
            Self::B11 => "11",
            Self::B12 => "12",
            Self::B13 => "13",
            Self::B14 => "14",
        }
    }

    pub fn subsystem(&self) -> SensorSubsystem {
        match self {
            Self::B1 | Self::B2 | Self::B3B | Self::B3N => SensorSubsystem::Vnir,
            Self::B4 | Self::B5 | Self::B6 | Self::B7 | Self::B8 | Self::B9 => {
                SensorSubsystem::Swir
            }
            _ => SensorSubsystem::Tir,
        }
    }

    /// Position of this band in the canonical stack order (0..15).
    pub fn canonical_index(&self) -> usize {
        *self as usize
    }

    pub fn resolution_m(&self) -> f64 {
        self.subsystem().resolution_m()
    }

    pub fn is_reflective(&self) -> bool {
        self.subsystem().is_reflective()
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BandId {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// Gain setting that selects which unit conversion coefficient applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GainCode {
    High,
    Normal,
    Low1,
    Low2,
}

impl GainCode {
    /// Metadata code for this gain ("HGH", "NOR", "LO1", "LO2").
    pub fn code(&self) -> &'static str {
        match self {
            Self::High => "HGH",
            Self::Normal => "NOR",
            Self::Low1 => "LO1",
            Self::Low2 => "LO2",
        }
    }
}

impl FromStr for GainCode {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HGH" | "HIGH" => Ok(Self::High),
            "NOR" | "NORMAL" => Ok(Self::Normal),
            "LO1" | "LG1" | "LOW1" => Ok(Self::Low1),
            "LO2" | "LG2" | "LOW2" => Ok(Self::Low2),
            _ => Err(SceneError::UnknownGain(s.to_string())),
        }
    }
}

impl fmt::Display for GainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Raw digital numbers for one band, as delivered by the scene reader.
#[derive(Debug, Clone)]
pub struct RawBand {
    pub band: BandId,
    /// Digital numbers in row-major order (top row first)
    pub data: Vec<u16>,
    pub width: usize,
    pub height: usize,
    /// Native pixel-to-CRS transform
    pub transform: AffineTransform,
    /// Native CRS identifier, e.g. "EPSG:4326"
    pub crs: String,
    pub gain: GainCode,
}

impl RawBand {
    /// Create a band, checking that `data` matches the declared shape.
    pub fn new(
        band: BandId,
        data: Vec<u16>,
        width: usize,
        height: usize,
        transform: AffineTransform,
        crs: impl Into<String>,
        gain: GainCode,
    ) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyShape { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(SceneError::ShapeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            band,
            data,
            width,
            height,
            transform,
            crs: crs.into(),
            gain,
        })
    }

    pub fn subsystem(&self) -> SensorSubsystem {
        self.band.subsystem()
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}
