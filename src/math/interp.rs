//! Piecewise-linear interpolation with clamped ends.
//!
//! Queries left of the first control point return the first value, queries
//! right of the last return the last value. There is no extrapolation.

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Interpolate `(xp, fp)` at `x`.
///
/// `xp` must be non-empty, sorted ascending and the same length as `fp`;
/// `ParameterMatrix` guarantees this for every caller in the crate.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert!(!xp.is_empty() && xp.len() == fp.len());
    if x.is_nan() {
        return f64::NAN;
    }

    let last = xp.len() - 1;
    // Number of control points at or left of x.
    let j = xp.partition_point(|&t| t <= x);
    if j == 0 {
        return fp[0];
    }
    if j > last {
        return fp[last];
    }

    let i = j - 1;
    let slope = (fp[i + 1] - fp[i]) / (xp[i + 1] - xp[i]);
    fp[i] + slope * (x - xp[i])
}

/// Interpolate every query in `xs`.
pub fn interp_all(xs: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| interp(x, xp, fp)).collect()
}
