//! Reductions that ignore missing values.
//!
//! Missing cells are filtered out before reducing. An all-missing input yields
//! NaN for both mean and standard deviation; a constant input yields a
//! standard deviation of exactly zero. Callers dividing by `nan_std` get NaN
//! (or ±inf) and must treat that as "not significant".

use crate::domain::is_missing;

/// Number of non-missing values.
pub fn count_present(values: &[f64]) -> usize {
    values.iter().filter(|v| !is_missing(**v)).count()
}

/// Arithmetic mean over non-missing values.
pub fn nan_mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in values {
        if !is_missing(v) {
            sum += v;
            n += 1;
        }
    }
    if n == 0 {
        return f64::NAN;
    }
    sum / n as f64
}

/// Population standard deviation (divisor `n`) over non-missing values.
pub fn nan_std(values: &[f64]) -> f64 {
    let mean = nan_mean(values);
    if mean.is_nan() {
        return f64::NAN;
    }
    let mut ss = 0.0;
    let mut n = 0usize;
    for &v in values {
        if !is_missing(v) {
            let d = v - mean;
            ss += d * d;
            n += 1;
        }
    }
    (ss / n as f64).sqrt()
}
