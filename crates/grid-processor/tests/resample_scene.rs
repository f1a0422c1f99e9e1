//! Resampling of multi-resolution scenes onto one target grid.

use grid_processor::{resample, Grid, HarmonizeError, ResamplingMethod, SourceRaster};
use test_utils::{create_index_grid, crs, scene};

const METHODS: [ResamplingMethod; 5] = [
    ResamplingMethod::Nearest,
    ResamplingMethod::Bilinear,
    ResamplingMethod::Cubic,
    ResamplingMethod::Average,
    ResamplingMethod::Mode,
];

fn as_values(data: &[u16]) -> Vec<f32> {
    data.iter().map(|&dn| dn as f32).collect()
}

#[test]
fn test_three_resolutions_onto_common_grid() {
    let grid = scene::target_grid();

    for band in scene::three_resolution_scene() {
        let values = as_values(&band.data);
        let source =
            SourceRaster::new(&values, band.width, band.height, band.transform, &band.crs);

        for method in METHODS {
            let out = resample(&source, &grid, method, f32::NAN).unwrap();
            assert_eq!(out.len(), 100 * 100);
            assert!(
                out.iter().all(|v| !v.is_nan()),
                "{} {} left gaps inside its footprint",
                band.band,
                method
            );
        }
    }
}

#[test]
fn test_shifted_grid_marks_uncovered_cells() {
    // Half the target lies east of the footprint
    let grid = scene::shifted_target_grid(750.0);

    for band in scene::three_resolution_scene() {
        let values = as_values(&band.data);
        let source =
            SourceRaster::new(&values, band.width, band.height, band.transform, &band.crs);
        let out = resample(&source, &grid, ResamplingMethod::Bilinear, f32::NAN).unwrap();

        for row in 0..grid.height {
            for col in 0..grid.width {
                let v = out[row * grid.width + col];
                if col < 50 {
                    assert!(!v.is_nan(), "{} ({}, {}) should be covered", band.band, col, row);
                } else {
                    assert!(v.is_nan(), "{} ({}, {}) should be no-data", band.band, col, row);
                }
            }
        }
    }
}

#[test]
fn test_self_resample_is_identity() {
    let grid = scene::target_grid();
    let values = create_index_grid(grid.width, grid.height);
    let source = SourceRaster::new(&values, grid.width, grid.height, grid.transform, &grid.crs);

    for method in METHODS {
        let out = resample(&source, &grid, method, f32::NAN).unwrap();
        assert_eq!(out, values, "{} changed values", method);
    }
}

#[test]
fn test_nearest_downsample_picks_covering_pixel() {
    // 100 px band onto a 20 x 20 grid of 75 m: every target center falls
    // inside exactly one 15 m pixel, the third of its 5 x 5 block
    let values = create_index_grid(100, 100);
    let band = &scene::three_resolution_scene()[0];
    let source = SourceRaster::new(&values, 100, 100, band.transform, &band.crs);

    let mut grid = scene::target_grid();
    grid.width = 20;
    grid.height = 20;
    grid.transform = scene::native_transform(20);

    let out = resample(&source, &grid, ResamplingMethod::Nearest, f32::NAN).unwrap();
    for row in 0..20 {
        for col in 0..20 {
            let expected = ((row * 5 + 2) * 100 + col * 5 + 2) as f32;
            assert_eq!(out[row * 20 + col], expected);
        }
    }
}

/// 15 m band onto a 20 x 20 grid of 75 m cells, one 5 x 5 pixel block each.
fn coarse_grid() -> Grid {
    let mut grid = scene::target_grid();
    grid.width = 20;
    grid.height = 20;
    grid.transform = scene::native_transform(20);
    grid
}

#[test]
fn test_average_downsample_block_means() {
    let mut values = create_index_grid(100, 100);
    // Block (1, 0) loses one pixel, block (2, 3) loses all of them
    values[3 * 100 + 7] = f32::NAN;
    for row in 15..20 {
        for col in 10..15 {
            values[row * 100 + col] = f32::NAN;
        }
    }
    let band = &scene::three_resolution_scene()[0];
    let source = SourceRaster::new(&values, 100, 100, band.transform, &band.crs);

    let out = resample(&source, &coarse_grid(), ResamplingMethod::Average, -1.0).unwrap();

    // Block (0, 0): rows 0..5 x cols 0..5 of row * 100 + col, mean 2 * 100 + 2
    assert_eq!(out[0], 202.0);
    // Block (4, 19): rows 95..100, cols 20..25
    assert_eq!(out[19 * 20 + 4], 9722.0);
    // Block (1, 0) without pixel 307: (25 * 207 - 307) / 24 = 4868 / 24
    assert!((out[1] - 202.833_33).abs() < 1e-3, "{}", out[1]);
    assert_eq!(out[3 * 20 + 2], -1.0);

    for row in 0..20 {
        for col in 0..20 {
            if (col, row) == (1, 0) || (col, row) == (2, 3) {
                continue;
            }
            let expected = ((row * 5 + 2) * 100 + col * 5 + 2) as f32;
            assert_eq!(out[row * 20 + col], expected, "block ({}, {})", col, row);
        }
    }
}

#[test]
fn test_mode_downsample_majority_class() {
    // Checkerboard of classes 1 and 2: a 5 x 5 block holds 13 of the class
    // at its top-left pixel and 12 of the other
    let values: Vec<f32> = (0..100 * 100)
        .map(|i| if (i % 100 + i / 100) % 2 == 0 { 1.0 } else { 2.0 })
        .collect();
    let band = &scene::three_resolution_scene()[0];
    let source = SourceRaster::new(&values, 100, 100, band.transform, &band.crs);

    let out = resample(&source, &coarse_grid(), ResamplingMethod::Mode, f32::NAN).unwrap();
    for row in 0..20 {
        for col in 0..20 {
            let expected = if (col + row) % 2 == 0 { 1.0 } else { 2.0 };
            assert_eq!(out[row * 20 + col], expected, "block ({}, {})", col, row);
        }
    }
}

#[test]
fn test_geographic_scene_onto_utm_grid() {
    let (_, bands) = scene::aster_scene(60, 11);
    let grid = scene::aster_target_grid();

    for band in &bands {
        assert_eq!(band.crs, crs::EPSG_4326);
        let values = as_values(&band.data);
        let source =
            SourceRaster::new(&values, band.width, band.height, band.transform, &band.crs);
        let out = resample(&source, &grid, ResamplingMethod::Nearest, -1.0).unwrap();

        assert_eq!(out.len(), grid.len());
        assert!(out.iter().all(|&v| v >= 1.0), "{} has uncovered cells", band.band);
    }
}

#[test]
fn test_unknown_target_crs() {
    let band = &scene::three_resolution_scene()[0];
    let values = as_values(&band.data);
    let source = SourceRaster::new(&values, band.width, band.height, band.transform, &band.crs);

    let mut grid = scene::target_grid();
    grid.crs = "EPSG:27700".to_string();

    let err = resample(&source, &grid, ResamplingMethod::Nearest, f32::NAN).unwrap_err();
    assert!(matches!(err, HarmonizeError::CrsResolutionFailed(_)));
}
