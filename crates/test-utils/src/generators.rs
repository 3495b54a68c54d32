//! Grid generators for contour tests.
//!
//! Every generator returns nested rows (`Vec<Vec<f64>>`, row 0 first) with
//! a known contour structure, so tests can assert polygon counts and shapes
//! without hand-writing large literals.

/// Creates a radially symmetric bump centred on the grid.
///
/// Each sample is `peak / (1 + d²)` where `d` is the distance from the
/// centre measured in units of `radius` samples. The level `peak / 2`
/// therefore crosses at exactly `radius` samples from the centre.
///
/// # Example
///
/// ```
/// use test_utils::create_bump_grid;
///
/// let rows = create_bump_grid(21, 21, 100.0, 4.0);
/// assert_eq!(rows.len(), 21);
/// assert_eq!(rows[10][10], 100.0);
/// ```
pub fn create_bump_grid(rows: usize, cols: usize, peak: f64, radius: f64) -> Vec<Vec<f64>> {
    let cy = (rows as f64 - 1.0) / 2.0;
    let cx = (cols as f64 - 1.0) / 2.0;
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let dy = (r as f64 - cy) / radius;
                    let dx = (c as f64 - cx) / radius;
                    peak / (1.0 + dx * dx + dy * dy)
                })
                .collect()
        })
        .collect()
}

/// Creates a 2x2 grid whose only interior window is a saddle.
///
/// The high corners (10) sit on one diagonal, the low corners (0) on the
/// other, so the window average is 5. A level below 5 joins the two high
/// samples into one region; a level above 5 leaves them separate.
pub fn create_saddle_grid() -> Vec<Vec<f64>> {
    vec![vec![10.0, 0.0], vec![0.0, 10.0]]
}

/// Creates an annulus: `high` inside the ring, `low` in the centre and outside.
///
/// Contouring between `low` and `high` yields an outer ring and a hole.
pub fn create_ring_grid(size: usize, inner: f64, outer: f64, low: f64, high: f64) -> Vec<Vec<f64>> {
    let centre = (size as f64 - 1.0) / 2.0;
    (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    let d = ((r as f64 - centre).powi(2) + (c as f64 - centre).powi(2)).sqrt();
                    if d >= inner && d <= outer {
                        high
                    } else {
                        low
                    }
                })
                .collect()
        })
        .collect()
}

/// Creates a left-to-right ramp: each sample equals its column index.
pub fn create_gradient_grid(rows: usize, cols: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|_| (0..cols).map(|c| c as f64).collect())
        .collect()
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(rows: usize, cols: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; cols]; rows]
}

/// Creates a checkerboard of `low` and `high`; every interior window is a saddle.
pub fn create_checkerboard_grid(rows: usize, cols: usize, low: f64, high: f64) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| if (r + c) % 2 == 0 { high } else { low })
                .collect()
        })
        .collect()
}

/// Creates deterministic pseudo-random values in `[0, 100)`.
///
/// Uses a simple hash so the same seed always yields the same grid.
pub fn create_noise_grid(rows: usize, cols: usize, seed: u32) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| (simple_hash(c as u32, r as u32, seed) % 10_000) as f64 / 100.0)
                .collect()
        })
        .collect()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_grid_peak_and_falloff() {
        let rows = create_bump_grid(11, 11, 50.0, 2.0);
        assert_eq!(rows[5][5], 50.0);
        // two samples from the centre is one radius: peak / 2
        assert_eq!(rows[5][7], 25.0);
        assert!(rows[0][0] < rows[5][0]);
    }

    #[test]
    fn test_ring_grid_has_low_centre() {
        let rows = create_ring_grid(15, 3.0, 6.0, 0.0, 1.0);
        assert_eq!(rows[7][7], 0.0);
        assert_eq!(rows[7][12], 1.0);
        assert_eq!(rows[0][0], 0.0);
    }

    #[test]
    fn test_noise_grid_is_deterministic() {
        let a = create_noise_grid(8, 8, 42);
        let b = create_noise_grid(8, 8, 42);
        let c = create_noise_grid(8, 8, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().flatten().all(|&v| (0.0..100.0).contains(&v)));
    }

    #[test]
    fn test_checkerboard_alternates() {
        let rows = create_checkerboard_grid(3, 3, 0.0, 1.0);
        assert_eq!(rows[0], vec![1.0, 0.0, 1.0]);
        assert_eq!(rows[1], vec![0.0, 1.0, 0.0]);
    }
}
