//! Interpolation methods for grid resampling.
//!
//! All functions take fractional pixel-center indices: `(0.0, 0.0)` is the
//! center of the top-left pixel and `(width - 1, height - 1)` the center of
//! the bottom-right one. A point belongs to the raster footprint when it lies
//! inside the outer pixel edges, i.e. `-0.5 <= x < width - 0.5`; points
//! outside return NaN. Near the edges, neighbors beyond the raster are
//! replaced by the nearest edge pixel.

/// Whether a fractional index lies inside the raster footprint.
#[inline]
pub fn in_footprint(width: usize, height: usize, x: f64, y: f64) -> bool {
    x.is_finite()
        && y.is_finite()
        && x >= -0.5
        && y >= -0.5
        && x < width as f64 - 0.5
        && y < height as f64 - 0.5
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Nearest neighbor interpolation.
///
/// Returns the value of the nearest grid point. A point exactly halfway
/// between two pixels takes the one with the higher index.
pub fn nearest_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    if !in_footprint(width, height, x, y) {
        return f32::NAN;
    }

    let col = ((x + 0.5).floor() as usize).min(width - 1);
    let row = ((y + 0.5).floor() as usize).min(height - 1);

    data[row * width + col]
}

/// Bilinear interpolation.
///
/// Smoothly interpolates between the four nearest grid points. Points with
/// zero weight are ignored, so sampling exactly on a pixel center returns
/// that pixel even when a neighbor is NaN.
pub fn bilinear_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    if !in_footprint(width, height, x, y) {
        return f32::NAN;
    }

    let x0f = x.floor();
    let y0f = y.floor();
    let xf = x - x0f;
    let yf = y - y0f;

    let x0 = clamp_index(x0f as isize, width);
    let x1 = clamp_index(x0f as isize + 1, width);
    let y0 = clamp_index(y0f as isize, height);
    let y1 = clamp_index(y0f as isize + 1, height);

    let corners = [
        (x0, y0, (1.0 - xf) * (1.0 - yf)),
        (x1, y0, xf * (1.0 - yf)),
        (x0, y1, (1.0 - xf) * yf),
        (x1, y1, xf * yf),
    ];

    let mut sum = 0.0f64;
    for (col, row, weight) in corners {
        if weight == 0.0 {
            continue;
        }
        let v = data[row * width + col];
        // Any contributing NaN makes the result NaN
        if v.is_nan() {
            return f32::NAN;
        }
        sum += weight * v as f64;
    }

    sum as f32
}

/// Bicubic interpolation.
///
/// Uses 16 surrounding points for smoother interpolation. Falls back to
/// bilinear when any of them is NaN.
pub fn cubic_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    if !in_footprint(width, height, x, y) {
        return f32::NAN;
    }

    let xi = x.floor() as isize;
    let yi = y.floor() as isize;

    let xf = x - xi as f64;
    let yf = y - yi as f64;

    // Sample 4x4 grid of points
    let mut values = [[0.0f64; 4]; 4];

    for j in 0..4 {
        for i in 0..4 {
            let px = clamp_index(xi + i as isize - 1, width);
            let py = clamp_index(yi + j as isize - 1, height);
            let v = data[py * width + px];

            if v.is_nan() {
                return bilinear_interpolate(data, width, height, x, y);
            }
            values[j][i] = v as f64;
        }
    }

    // Cubic interpolation along x for each row
    let mut row_values = [0.0f64; 4];
    for j in 0..4 {
        row_values[j] = cubic_1d(values[j][0], values[j][1], values[j][2], values[j][3], xf);
    }

    // Cubic interpolation along y
    cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf) as f32
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    // Catmull-Rom coefficients
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_interpolate() {
        let data: Vec<f32> = vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ];

        assert_eq!(nearest_interpolate(&data, 3, 3, 0.0, 0.0), 1.0);
        assert_eq!(nearest_interpolate(&data, 3, 3, 1.0, 1.0), 5.0);
        assert_eq!(nearest_interpolate(&data, 3, 3, 0.4, 0.4), 1.0);
        assert_eq!(nearest_interpolate(&data, 3, 3, 0.6, 0.6), 5.0);
        // Ties go to the higher index
        assert_eq!(nearest_interpolate(&data, 3, 3, 0.5, 0.0), 2.0);
        // Outer half pixel still belongs to the edge pixel
        assert_eq!(nearest_interpolate(&data, 3, 3, -0.5, 2.4), 7.0);
    }

    #[test]
    fn test_outside_footprint_is_nan() {
        let data = vec![1.0f32; 9];
        assert!(nearest_interpolate(&data, 3, 3, -0.51, 0.0).is_nan());
        assert!(nearest_interpolate(&data, 3, 3, 2.5, 0.0).is_nan());
        assert!(bilinear_interpolate(&data, 3, 3, 0.0, 2.5).is_nan());
        assert!(cubic_interpolate(&data, 3, 3, f64::NAN, 0.0).is_nan());
    }

    #[test]
    fn test_bilinear_interpolate() {
        let data: Vec<f32> = vec![
            1.0, 2.0,
            3.0, 4.0,
        ];

        // Corners
        assert_eq!(bilinear_interpolate(&data, 2, 2, 0.0, 0.0), 1.0);
        assert_eq!(bilinear_interpolate(&data, 2, 2, 1.0, 0.0), 2.0);
        assert_eq!(bilinear_interpolate(&data, 2, 2, 0.0, 1.0), 3.0);
        assert_eq!(bilinear_interpolate(&data, 2, 2, 1.0, 1.0), 4.0);

        // Center
        let center = bilinear_interpolate(&data, 2, 2, 0.5, 0.5);
        assert!((center - 2.5).abs() < 0.001);

        // Edge replication in the outer half pixel
        assert_eq!(bilinear_interpolate(&data, 2, 2, -0.25, 0.0), 1.0);
    }

    #[test]
    fn test_bilinear_with_nan() {
        let data: Vec<f32> = vec![
            1.0, f32::NAN,
            3.0, 4.0,
        ];

        // Should return NaN when any contributing corner is NaN
        assert!(bilinear_interpolate(&data, 2, 2, 0.5, 0.5).is_nan());

        // Exactly on a valid pixel center the NaN neighbor has no weight
        assert_eq!(bilinear_interpolate(&data, 2, 2, 0.0, 1.0), 3.0);
    }

    #[test]
    fn test_cubic_exact_on_pixel_centers() {
        let data: Vec<f32> = (0..16).map(|v| (v * v) as f32).collect();
        for row in 0..4 {
            for col in 0..4 {
                let v = cubic_interpolate(&data, 4, 4, col as f64, row as f64);
                assert_eq!(v, data[row * 4 + col]);
            }
        }
    }

    #[test]
    fn test_cubic_reproduces_linear_ramp() {
        let data: Vec<f32> = (0..25).map(|i| (i % 5) as f32 * 10.0).collect();
        let v = cubic_interpolate(&data, 5, 5, 2.25, 2.0);
        assert!((v - 22.5).abs() < 1e-4);
    }

    #[test]
    fn test_cubic_nan_falls_back_to_bilinear() {
        let mut data = vec![1.0f32; 16];
        data[0] = f32::NAN;
        let v = cubic_interpolate(&data, 4, 4, 2.5, 2.5);
        assert_eq!(v, 1.0);
    }
}
