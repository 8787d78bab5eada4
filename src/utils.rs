//! Assorted numeric helpers.

/// `num` evenly spaced values over `[start, stop]`, both ends included.
///
/// The last value is pinned to `stop` exactly so the grid always covers the
/// sample maximum without rounding drift. A single value yields `[start]`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * delta).collect();
            out[num - 1] = stop;
            out
        }
    }
}
