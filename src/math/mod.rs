pub mod polygon_2d;

/// 2D point type in section coordinates (x horizontal, y = elevation).
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Sorts elevations top-down and drops values closer than [`TOLERANCE`]
/// to their predecessor.
#[must_use]
pub fn descending_unique(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.dedup_by(|next, prev| (*prev - *next).abs() < TOLERANCE);
    sorted
}

/// Returns the running sums of `thicknesses` as negative elevations.
#[must_use]
pub fn cumulative_elevations(thicknesses: &[f64]) -> Vec<f64> {
    thicknesses
        .iter()
        .scan(0.0, |depth, t| {
            *depth += t;
            Some(-*depth)
        })
        .collect()
}
