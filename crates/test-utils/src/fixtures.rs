//! Common test fixtures for aster-harmonize tests.
//!
//! This module provides pre-defined scenes and grids that represent common
//! scenarios in band calibration and harmonization.

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic, the native CRS of ASTER L1T corner coordinates
    pub const EPSG_4326: &str = "EPSG:4326";

    /// WGS84 / UTM zone 22S (southern Brazil)
    pub const UTM_22S: &str = "EPSG:32722";
}

/// ASTER L1T scene metadata as delivered by the container reader.
pub mod metadata {
    use aster_common::SceneMetadata;

    /// Metadata of a small scene centered on 51W 30S.
    ///
    /// Corners are (lat, lon); the footprint spans 0.02 degrees each way.
    pub const ASTER_SCENE: [(&str, &str); 17] = [
        ("SOLARDIRECTION", "58.420217, 51.872612"),
        ("CALENDARDATE", "20170321"),
        ("UPPERLEFT", "-29.99, -51.01"),
        ("LOWERRIGHT", "-30.01, -50.99"),
        ("GAIN.1", "01, HGH"),
        ("GAIN.2", "02, HGH"),
        ("GAIN.3", "3N, NOR"),
        ("GAIN.4", "3B, NOR"),
        ("GAIN.5", "04, NOR"),
        ("GAIN.6", "05, NOR"),
        ("GAIN.7", "06, NOR"),
        ("GAIN.8", "07, NOR"),
        ("GAIN.9", "08, NOR"),
        ("GAIN.10", "09, NOR"),
        ("SCENECLOUDCOVERAGE", "3"),
        ("POINTINGANGLE", "8.562"),
        ("ORBITDIRECTION", "DE"),
    ];

    /// Parsed [`ASTER_SCENE`].
    ///
    /// # Panics
    /// Never for the fixture as written.
    pub fn aster_metadata() -> SceneMetadata {
        SceneMetadata::from_pairs(ASTER_SCENE).expect("fixture metadata is valid")
    }
}

/// Synthetic scenes whose bands share one ground footprint.
pub mod scene {
    use aster_common::{
        AffineTransform, BandId, BoundingBox, GainCode, Grid, RawBand, SceneGeometry,
        SceneMetadata,
    };
    use chrono::NaiveDate;

    use super::{crs, metadata};
    use crate::{create_dn_ramp, create_scattered_dn};

    /// West edge of the projected synthetic scene (UTM 22S, meters).
    pub const WEST: f64 = 500_000.0;
    /// North edge of the projected synthetic scene (UTM 22S, meters).
    pub const NORTH: f64 = 7_000_000.0;
    /// Side length of the projected synthetic scene (meters).
    pub const EXTENT_M: f64 = 1_500.0;

    /// Bands and square native sizes of the three-resolution scene:
    /// 100 px of nominal 15 m, 50 px of 30 m and 20 px of 90 m.
    pub const THREE_RESOLUTION: [(BandId, usize); 3] =
        [(BandId::B1, 100), (BandId::B4, 50), (BandId::B10, 20)];

    /// Ground footprint of the projected synthetic scene.
    pub fn footprint() -> BoundingBox {
        BoundingBox::new(WEST, NORTH - EXTENT_M, WEST + EXTENT_M, NORTH)
    }

    /// Native transform of a `size` x `size` band spanning the footprint.
    pub fn native_transform(size: usize) -> AffineTransform {
        let f = footprint();
        AffineTransform::from_bounds(f.min_x, f.min_y, f.max_x, f.max_y, size, size)
    }

    /// A projected band with the given digital numbers.
    ///
    /// # Panics
    /// If `data` does not hold `size * size` values.
    pub fn raw_band(band: BandId, size: usize, data: Vec<u16>) -> RawBand {
        RawBand::new(
            band,
            data,
            size,
            size,
            native_transform(size),
            crs::UTM_22S,
            GainCode::Normal,
        )
        .expect("synthetic band shape is consistent")
    }

    /// The three-resolution scene with ramp digital numbers.
    pub fn three_resolution_scene() -> Vec<RawBand> {
        THREE_RESOLUTION
            .iter()
            .map(|&(band, size)| raw_band(band, size, create_dn_ramp(size, size)))
            .collect()
    }

    /// Target grid of 100 x 100 cells of 15 m over the projected footprint.
    pub fn target_grid() -> Grid {
        Grid::new(
            100,
            100,
            AffineTransform::from_origin(WEST, NORTH, 15.0, 15.0),
            crs::UTM_22S,
        )
        .expect("fixture grid is not empty")
    }

    /// Target grid shifted east by `shift_m`, partly outside the footprint.
    pub fn shifted_target_grid(shift_m: f64) -> Grid {
        let mut grid = target_grid();
        grid.transform = AffineTransform::from_origin(WEST + shift_m, NORTH, 15.0, 15.0);
        grid
    }

    /// Sun 45 degrees above the horizon on the March equinox.
    pub fn scene_geometry() -> SceneGeometry {
        SceneGeometry::new(45.0, equinox())
    }

    pub fn equinox() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 3, 21).expect("valid date")
    }

    /// Every ASTER band of the [`metadata::ASTER_SCENE`] footprint in native
    /// geographic coordinates.
    ///
    /// VNIR bands are `vnir_size` pixels square, SWIR half and TIR a sixth of
    /// that, matching the 15/30/90 m sampling of the instrument.
    pub fn aster_scene(vnir_size: usize, seed: u32) -> (SceneMetadata, Vec<RawBand>) {
        let meta = metadata::aster_metadata();
        let bands = BandId::ALL
            .iter()
            .enumerate()
            .map(|(i, &band)| {
                let size = match band.resolution_m() as u32 {
                    15 => vnir_size,
                    30 => (vnir_size / 2).max(1),
                    _ => (vnir_size / 6).max(1),
                };
                let data = create_scattered_dn(size, size, seed.wrapping_add(i as u32));
                meta.raw_band(band, data, size, size)
                    .expect("fixture metadata lists every reflective gain")
            })
            .collect();
        (meta, bands)
    }

    /// 100 x 100 cells of 15 m in UTM 22S, inside the
    /// [`metadata::ASTER_SCENE`] footprint.
    pub fn aster_target_grid() -> Grid {
        Grid::new(
            100,
            100,
            AffineTransform::from_origin(499_200.0, 6_681_900.0, 15.0, 15.0),
            crs::UTM_22S,
        )
        .expect("fixture grid is not empty")
    }
}
