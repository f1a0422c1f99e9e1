//! Calibration of a full synthetic ASTER scene against the published table.

use aster_common::{BandId, GainCode, SensorSubsystem};
use radiometry::{
    earth_sun_distance, CalibrationTable, Calibrator, Quantity, RadiometryError, SolarGeometry,
};
use std::f64::consts::PI;
use test_utils::{metadata, scene};

#[test]
fn test_every_fixture_band_resolves_a_coefficient() {
    let table = CalibrationTable::aster();
    let (_, bands) = scene::aster_scene(12, 1);

    for band in &bands {
        let coefficient = table
            .lookup(band.subsystem(), band.band, band.gain)
            .unwrap_or_else(|e| panic!("{}: {}", band.band, e));
        assert_eq!(coefficient.nodata, Some(0));
        assert!(coefficient.scale > 0.0);
        assert_eq!(coefficient.offset, -coefficient.scale);
    }
}

#[test]
fn test_reflectance_matches_closed_form() {
    let table = CalibrationTable::aster();
    let meta = metadata::aster_metadata();
    let calibrator = Calibrator::new(&table, &meta.scene_geometry()).unwrap();
    let (_, bands) = scene::aster_scene(12, 3);

    let d = earth_sun_distance(80);
    let cos_zenith = (90.0f64 - meta.sun_elevation_deg).to_radians().cos();

    for band in bands.iter().filter(|b| b.band.is_reflective()) {
        let out = calibrator.calibrate(band, Quantity::Reflectance).unwrap();
        assert_eq!(out.quantity, Quantity::Reflectance);
        assert_eq!((out.width, out.height), (band.width, band.height));
        assert_eq!(out.transform, band.transform);

        let ucc = table
            .lookup(band.subsystem(), band.band, band.gain)
            .unwrap()
            .scale;
        let e_sun = table.solar_constant(band.band).unwrap().irradiance();

        for (dn, value) in band.data.iter().zip(&out.data) {
            let radiance = (*dn as f64 - 1.0) * ucc;
            let expected = PI * radiance * d * d / (e_sun * cos_zenith);
            assert!(
                (*value as f64 - expected).abs() < 1e-5,
                "{} dn {}: {} vs {}",
                band.band,
                dn,
                value,
                expected
            );
        }
    }
}

#[test]
fn test_thermal_radiance_only() {
    let table = CalibrationTable::aster();
    let geometry = scene::scene_geometry();
    let calibrator = Calibrator::new(&table, &geometry).unwrap();
    let (_, bands) = scene::aster_scene(12, 5);

    for band in bands.iter().filter(|b| b.subsystem() == SensorSubsystem::Tir) {
        assert_eq!(band.gain, GainCode::Normal);
        let radiance = calibrator.calibrate(band, Quantity::Radiance).unwrap();
        assert_eq!(radiance.valid_count(), band.data.len());

        let err = calibrator
            .calibrate(band, Quantity::Reflectance)
            .unwrap_err();
        assert_eq!(err, RadiometryError::SolarConstantNotFound { band: band.band });
    }
}

#[test]
fn test_backward_band_shares_nadir_irradiance() {
    let table = CalibrationTable::aster();
    assert_eq!(
        table.solar_constant(BandId::B3B).unwrap(),
        table.solar_constant(BandId::B3N).unwrap()
    );
}

#[test]
fn test_calibration_is_deterministic() {
    let table = CalibrationTable::aster();
    let geometry = SolarGeometry::from_scene(&scene::scene_geometry()).unwrap();
    assert_eq!(geometry.day_of_year, 80);

    let calibrator = Calibrator::new(&table, &scene::scene_geometry()).unwrap();
    let (_, bands) = scene::aster_scene(12, 9);
    let first = calibrator.calibrate(&bands[0], Quantity::Reflectance).unwrap();
    let second = calibrator.calibrate(&bands[0], Quantity::Reflectance).unwrap();
    assert_eq!(first.data, second.data);
}
