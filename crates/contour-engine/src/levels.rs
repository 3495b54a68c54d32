//! Contour level generation.

/// Generate contour levels by stepping `interval` across `[min_value, max_value]`.
///
/// Starts at the first multiple of `interval` at or above `min_value`. Each
/// level is computed as `start + i * interval` so long runs do not
/// accumulate rounding error.
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(max_value > min_value) || !min_value.is_finite() || !max_value.is_finite() {
        return vec![];
    }

    let start = (min_value / interval).ceil() * interval;
    // tolerate rounding at the top of the range
    let limit = max_value + interval * 1e-9;

    (0..)
        .map(|i| start + i as f64 * interval)
        .take_while(|&level| level <= limit)
        .collect()
}
