//! Interpretation of ASTER L1T scene metadata.
//!
//! The container reader hands over the global metadata as key/value string
//! pairs. Only the entries needed for calibration and georeferencing are
//! interpreted here:
//!
//! | Key              | Example                  | Meaning                          |
//! |------------------|--------------------------|----------------------------------|
//! | `SOLARDIRECTION` | `"58.42, 51.87"`         | sun azimuth, sun elevation (deg) |
//! | `CALENDARDATE`   | `"20170321"`             | acquisition date                 |
//! | `UPPERLEFT`      | `"-24.05, -49.97"`       | lat, lon of the upper-left corner |
//! | `LOWERRIGHT`     | `"-24.62, -49.35"`       | lat, lon of the lower-right corner |
//! | `GAIN.n`         | `"01, HGH"`              | band label, gain code            |

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::{
    parse_calendar_date, AffineTransform, BandId, BoundingBox, GainCode, RawBand, SceneError,
    SceneGeometry, SceneResult,
};

/// CRS of the corner coordinates and therefore of every native band grid.
pub const NATIVE_CRS: &str = "EPSG:4326";

const SOLAR_DIRECTION: &str = "SOLARDIRECTION";
const CALENDAR_DATE: &str = "CALENDARDATE";
const UPPER_LEFT: &str = "UPPERLEFT";
const LOWER_RIGHT: &str = "LOWERRIGHT";
const GAIN_PREFIX: &str = "GAIN";

/// Calibration and georeferencing facts for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMetadata {
    pub solar_azimuth_deg: f64,
    pub sun_elevation_deg: f64,
    pub acquisition_date: NaiveDate,
    /// Upper-left corner as (lon, lat)
    pub upper_left: (f64, f64),
    /// Lower-right corner as (lon, lat)
    pub lower_right: (f64, f64),
    gains: BTreeMap<BandId, GainCode>,
}

impl SceneMetadata {
    /// Interpret metadata key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> SceneResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut solar = None;
        let mut date = None;
        let mut upper_left = None;
        let mut lower_right = None;
        let mut gains = BTreeMap::new();

        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let value = value.as_ref();

            match key {
                SOLAR_DIRECTION => solar = Some(parse_pair(key, value)?),
                CALENDAR_DATE => date = Some(parse_calendar_date(value)?),
                UPPER_LEFT => upper_left = Some(swap(parse_pair(key, value)?)),
                LOWER_RIGHT => lower_right = Some(swap(parse_pair(key, value)?)),
                _ if key.starts_with(GAIN_PREFIX) => {
                    let (band, gain) = parse_gain(key, value)?;
                    gains.insert(band, gain);
                }
                _ => {}
            }
        }

        let (solar_azimuth_deg, sun_elevation_deg) =
            solar.ok_or_else(|| SceneError::MissingMetadata(SOLAR_DIRECTION.to_string()))?;

        // The thermal subsystem has a single gain setting.
        for band in BandId::ALL.iter().filter(|b| !b.is_reflective()) {
            gains.insert(*band, GainCode::Normal);
        }

        Ok(Self {
            solar_azimuth_deg,
            sun_elevation_deg,
            acquisition_date: date
                .ok_or_else(|| SceneError::MissingMetadata(CALENDAR_DATE.to_string()))?,
            upper_left: upper_left
                .ok_or_else(|| SceneError::MissingMetadata(UPPER_LEFT.to_string()))?,
            lower_right: lower_right
                .ok_or_else(|| SceneError::MissingMetadata(LOWER_RIGHT.to_string()))?,
            gains,
        })
    }

    pub fn scene_geometry(&self) -> SceneGeometry {
        SceneGeometry::new(self.sun_elevation_deg, self.acquisition_date)
    }

    /// Gain setting recorded for `band`.
    pub fn gain(&self, band: BandId) -> SceneResult<GainCode> {
        self.gains
            .get(&band)
            .copied()
            .ok_or_else(|| SceneError::MissingMetadata(format!("{}.{}", GAIN_PREFIX, band)))
    }

    /// Scene footprint in lon/lat degrees.
    pub fn footprint(&self) -> BoundingBox {
        let (west, north) = self.upper_left;
        let (east, south) = self.lower_right;
        BoundingBox::new(west.min(east), south.min(north), west.max(east), south.max(north))
    }

    /// Native transform of a band raster of the given shape.
    ///
    /// Every band spans the same footprint; only the pixel count differs
    /// between subsystems.
    pub fn native_transform(&self, width: usize, height: usize) -> AffineTransform {
        let (west, north) = self.upper_left;
        let (east, south) = self.lower_right;
        AffineTransform::from_bounds(west, south, east, north, width, height)
    }

    /// Attach georeferencing and gain to a band's raw digital numbers.
    pub fn raw_band(
        &self,
        band: BandId,
        data: Vec<u16>,
        width: usize,
        height: usize,
    ) -> SceneResult<RawBand> {
        RawBand::new(
            band,
            data,
            width,
            height,
            self.native_transform(width, height),
            NATIVE_CRS,
            self.gain(band)?,
        )
    }
}

/// Parse "a, b" into two floats.
fn parse_pair(key: &str, value: &str) -> SceneResult<(f64, f64)> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(SceneError::invalid_metadata(key, value));
    }

    let first = parts[0]
        .parse()
        .map_err(|_| SceneError::invalid_metadata(key, value))?;
    let second = parts[1]
        .parse()
        .map_err(|_| SceneError::invalid_metadata(key, value))?;
    Ok((first, second))
}

fn swap((a, b): (f64, f64)) -> (f64, f64) {
    (b, a)
}

/// Parse a "<band>, <gain>" entry such as "3N, NOR".
fn parse_gain(key: &str, value: &str) -> SceneResult<(BandId, GainCode)> {
    let mut parts = value.split(',').map(str::trim);
    let (Some(band), Some(gain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SceneError::invalid_metadata(key, value));
    };
    Ok((BandId::from_label(band)?, gain.parse()?))
}
