//! Per-scene acquisition geometry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// Sun position and acquisition date for one scene.
///
/// Values are stored as delivered; range checks happen when the geometry is
/// resolved for calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneGeometry {
    /// Sun elevation above the horizon, degrees
    pub sun_elevation_deg: f64,
    pub acquisition_date: NaiveDate,
}

impl SceneGeometry {
    pub fn new(sun_elevation_deg: f64, acquisition_date: NaiveDate) -> Self {
        Self {
            sun_elevation_deg,
            acquisition_date,
        }
    }
}

/// Parse an ASTER calendar date ("YYYYMMDD", ISO "YYYY-MM-DD" also accepted).
pub fn parse_calendar_date(s: &str) -> SceneResult<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| SceneError::invalid_metadata("CALENDARDATE", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date() {
        let date = parse_calendar_date("20170321").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 3, 21).unwrap());

        let iso = parse_calendar_date("2017-03-21").unwrap();
        assert_eq!(iso, date);

        assert!(parse_calendar_date("20171321").is_err());
        assert!(parse_calendar_date("yesterday").is_err());
    }
}
