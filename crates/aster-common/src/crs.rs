//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SceneError;

/// CRS codes the harmonizer can project between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
    /// WGS84 / UTM (EPSG:326zz north, EPSG:327zz south)
    Utm { zone: u8, north: bool },
}

impl CrsCode {
    /// Parse a CRS identifier.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326", "epsg:32722"
    /// - "CRS:84" (equivalent to EPSG:4326)
    /// - "+init=epsg:32633" (proj4 style init string)
    /// - "32633" (bare EPSG number)
    pub fn parse(s: &str) -> Result<Self, SceneError> {
        let normalized = s.trim().to_uppercase();
        let normalized = normalized.strip_prefix("+INIT=").unwrap_or(&normalized);

        if normalized == "CRS:84" || normalized == "WGS84" {
            return Ok(CrsCode::Epsg4326);
        }

        let digits = normalized.strip_prefix("EPSG:").unwrap_or(normalized);
        let code: u32 = digits
            .parse()
            .map_err(|_| SceneError::InvalidCrs(s.to_string()))?;

        Self::from_epsg(code).ok_or_else(|| SceneError::InvalidCrs(s.to_string()))
    }

    /// Look up a numeric EPSG code.
    pub fn from_epsg(code: u32) -> Option<Self> {
        match code {
            4326 => Some(CrsCode::Epsg4326),
            3857 | 900913 => Some(CrsCode::Epsg3857),
            32601..=32660 => Some(CrsCode::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Some(CrsCode::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => None,
        }
    }

    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg3857 => 3857,
            CrsCode::Utm { zone, north: true } => 32600 + *zone as u32,
            CrsCode::Utm { zone, north: false } => 32700 + *zone as u32,
        }
    }
}

impl FromStr for CrsCode {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
