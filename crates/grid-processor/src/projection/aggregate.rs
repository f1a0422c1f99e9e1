//! Area aggregation for resampling onto coarser grids.
//!
//! Instead of sampling one point, an aggregating method looks at every native
//! pixel whose center falls inside the target cell. Window bounds use the same
//! fractional pixel-center indices as [`super::interpolation`].

/// Half-open range of native pixels `[col_start, col_end) x [row_start, row_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_start: usize,
    pub col_end: usize,
    pub row_start: usize,
    pub row_end: usize,
}

impl PixelWindow {
    /// Pixels whose center index `i` satisfies `lo <= i < hi` on both axes,
    /// clamped to the raster. None when no pixel center is enclosed.
    pub fn enclosed(
        (lo_x, lo_y): (f64, f64),
        (hi_x, hi_y): (f64, f64),
        width: usize,
        height: usize,
    ) -> Option<Self> {
        if ![lo_x, lo_y, hi_x, hi_y].iter().all(|v| v.is_finite()) {
            return None;
        }

        let window = Self {
            col_start: clamp_bound(lo_x.ceil(), width),
            col_end: clamp_bound(hi_x.ceil(), width),
            row_start: clamp_bound(lo_y.ceil(), height),
            row_end: clamp_bound(hi_y.ceil(), height),
        };
        (!window.is_empty()).then_some(window)
    }

    /// The single pixel nearest to center index (x, y).
    pub fn containing(x: f64, y: f64, width: usize, height: usize) -> Self {
        let col = clamp_bound((x + 0.5).floor(), width).min(width.saturating_sub(1));
        let row = clamp_bound((y + 0.5).floor(), height).min(height.saturating_sub(1));
        Self {
            col_start: col,
            col_end: col + 1,
            row_start: row,
            row_end: row + 1,
        }
    }

    pub fn len(&self) -> usize {
        (self.col_end - self.col_start) * (self.row_end - self.row_start)
    }

    pub fn is_empty(&self) -> bool {
        self.col_start >= self.col_end || self.row_start >= self.row_end
    }

    /// Valid (non-NaN) values under the window, row by row.
    fn valid_values<'a>(&self, data: &'a [f32], width: usize) -> impl Iterator<Item = f32> + 'a {
        let (cols, rows) = (self.col_start..self.col_end, self.row_start..self.row_end);
        rows.flat_map(move |row| {
            data[row * width + cols.start..row * width + cols.end]
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
        })
    }
}

#[inline]
fn clamp_bound(v: f64, len: usize) -> usize {
    if v <= 0.0 {
        0
    } else if v >= len as f64 {
        len
    } else {
        v as usize
    }
}

/// Mean of the valid pixels under the window, NaN when none are valid.
pub fn average_aggregate(data: &[f32], width: usize, window: &PixelWindow) -> f32 {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for v in window.valid_values(data, width) {
        sum += v as f64;
        count += 1;
    }

    if count == 0 {
        f32::NAN
    } else {
        (sum / count as f64) as f32
    }
}

/// Most frequent valid value under the window, NaN when none are valid.
///
/// Ties go to the smallest value.
pub fn mode_aggregate(data: &[f32], width: usize, window: &PixelWindow) -> f32 {
    let mut values: Vec<f32> = window.valid_values(data, width).collect();
    if values.is_empty() {
        return f32::NAN;
    }
    values.sort_unstable_by(f32::total_cmp);

    let mut best = values[0];
    let mut best_run = 0usize;
    let mut run_start = 0usize;
    for i in 1..=values.len() {
        if i == values.len() || values[i].total_cmp(&values[run_start]).is_ne() {
            let run = i - run_start;
            if run > best_run {
                best_run = run;
                best = values[run_start];
            }
            run_start = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const BLOCKS: [f32; 16] = [
        1.0, 2.0, 5.0, 5.0,
        3.0, 4.0, 5.0, 7.0,
        f32::NAN, f32::NAN, 9.0, 9.0,
        f32::NAN, f32::NAN, 8.0, 9.0,
    ];

    fn quadrant(col: usize, row: usize) -> PixelWindow {
        PixelWindow {
            col_start: col * 2,
            col_end: col * 2 + 2,
            row_start: row * 2,
            row_end: row * 2 + 2,
        }
    }

    #[test]
    fn test_enclosed_window() {
        // Cell edges at pixel-center indices -0.5 and 1.5 enclose pixels 0 and 1
        let w = PixelWindow::enclosed((-0.5, -0.5), (1.5, 1.5), 4, 4).unwrap();
        assert_eq!(w, quadrant(0, 0));
        assert_eq!(w.len(), 4);

        // Clamped at the raster edge
        let w = PixelWindow::enclosed((2.5, -3.0), (9.0, 0.5), 4, 4).unwrap();
        assert_eq!((w.col_start, w.col_end, w.row_start, w.row_end), (3, 4, 0, 1));

        // A cell narrower than a pixel encloses no center
        assert!(PixelWindow::enclosed((0.1, 0.1), (0.4, 0.4), 4, 4).is_none());
        assert!(PixelWindow::enclosed((f64::NAN, 0.0), (1.0, 1.0), 4, 4).is_none());
    }

    #[test]
    fn test_containing_window() {
        let w = PixelWindow::containing(0.6, 2.4, 4, 4);
        assert_eq!((w.col_start, w.row_start, w.len()), (1, 2, 1));
        let w = PixelWindow::containing(3.49, -0.5, 4, 4);
        assert_eq!((w.col_start, w.row_start), (3, 0));
    }

    #[test]
    fn test_average() {
        assert_eq!(average_aggregate(&BLOCKS, 4, &quadrant(0, 0)), 2.5);
        assert_eq!(average_aggregate(&BLOCKS, 4, &quadrant(1, 0)), 5.5);
        assert_eq!(average_aggregate(&BLOCKS, 4, &quadrant(1, 1)), 8.75);
        // All pixels missing
        assert!(average_aggregate(&BLOCKS, 4, &quadrant(0, 1)).is_nan());
    }

    #[test]
    fn test_average_skips_nan() {
        let w = PixelWindow {
            col_start: 1,
            col_end: 3,
            row_start: 1,
            row_end: 3,
        };
        // 4, 5, 9 and one NaN
        assert_eq!(average_aggregate(&BLOCKS, 4, &w), 6.0);
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode_aggregate(&BLOCKS, 4, &quadrant(1, 0)), 5.0);
        assert_eq!(mode_aggregate(&BLOCKS, 4, &quadrant(1, 1)), 9.0);
        // Four distinct values: smallest wins
        assert_eq!(mode_aggregate(&BLOCKS, 4, &quadrant(0, 0)), 1.0);
        assert!(mode_aggregate(&BLOCKS, 4, &quadrant(0, 1)).is_nan());
    }
}
