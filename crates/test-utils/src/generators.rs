//! Test data generators for creating synthetic band data.
//!
//! Digital numbers stay inside 1..=255 unless a sentinel is placed
//! explicitly with [`with_nodata`].

/// Creates an f32 grid whose values are the row-major pixel index.
///
/// `values[row * width + col] == (row * width + col) as f32`, so a resampled
/// value names the source pixel it came from.
///
/// # Example
///
/// ```
/// use test_utils::create_index_grid;
///
/// let values = create_index_grid(4, 3);
/// assert_eq!(values.len(), 12);
/// assert_eq!(values[5], 5.0); // col 1, row 1
/// ```
pub fn create_index_grid(width: usize, height: usize) -> Vec<f32> {
    (0..width * height).map(|i| i as f32).collect()
}

/// Creates a digital-number ramp that never hits the no-data sentinel.
///
/// Values cycle through 1..=255 with `(col * 7 + row * 3) % 255 + 1`, which
/// keeps neighbouring pixels distinct in both directions.
///
/// # Example
///
/// ```
/// use test_utils::create_dn_ramp;
///
/// let dn = create_dn_ramp(4, 2);
/// assert_eq!(dn[0], 1);
/// assert_eq!(dn[1], 8);
/// assert_eq!(dn[4], 4);
/// assert!(dn.iter().all(|&v| v > 0));
/// ```
pub fn create_dn_ramp(width: usize, height: usize) -> Vec<u16> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(((col * 7 + row * 3) % 255 + 1) as u16);
        }
    }
    data
}

/// Creates a digital-number grid filled with one value.
pub fn create_constant_dn(width: usize, height: usize, value: u16) -> Vec<u16> {
    vec![value; width * height]
}

/// Creates scattered, scene-like digital numbers.
///
/// Uses a simple hash-based approach for reproducibility. Values lie in
/// 1..=254 so neither the no-data sentinel nor saturation appears.
pub fn create_scattered_dn(width: usize, height: usize, seed: u32) -> Vec<u16> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 254 + 1) as u16);
        }
    }
    data
}

/// Replaces the given (col, row) positions with the no-data sentinel.
pub fn with_nodata(
    mut data: Vec<u16>,
    width: usize,
    positions: &[(usize, usize)],
    sentinel: u16,
) -> Vec<u16> {
    for &(col, row) in positions.iter().filter(|(col, _)| *col < width) {
        if let Some(v) = data.get_mut(row * width + col) {
            *v = sentinel;
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
