//! Suppression of channel rows with too few detections.
//!
//! A row whose share of present cells falls below the coverage floor is taken
//! to be noise rather than a signal track and is blanked as a whole. Rows at
//! or above the floor pass through untouched; the rule is never inverted to
//! blank well-covered rows.

use nalgebra::DMatrix;

use crate::domain::{MISSING, is_missing};

/// True if a row with `present` of `cols` cells falls below `min_pct` percent.
///
/// Compared as `present * 100 < min_pct * cols` so a row sitting exactly on the
/// floor is kept.
pub fn below_coverage(present: usize, cols: usize, min_pct: f64) -> bool {
    (present as f64) * 100.0 < min_pct * cols as f64
}

/// Blank every row whose detection coverage is below `min_pct` percent.
pub fn suppress_sparse_rows(detections: &DMatrix<f64>, min_pct: f64) -> DMatrix<f64> {
    let mut out = detections.clone();
    let cols = out.ncols();
    let mut suppressed = 0usize;

    for i in 0..out.nrows() {
        let present = out.row(i).iter().filter(|v| !is_missing(**v)).count();
        if below_coverage(present, cols, min_pct) {
            out.row_mut(i).fill(MISSING);
            suppressed += 1;
        }
    }

    log::debug!("sparse-row suppression: blanked {suppressed} of {} rows", out.nrows());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_present(present: usize, cols: usize) -> DMatrix<f64> {
        DMatrix::from_fn(1, cols, |_, c| if c < present { 1.0 + c as f64 } else { MISSING })
    }

    #[test]
    fn exactly_ten_percent_is_kept() {
        let m = row_with_present(1, 10);
        let out = suppress_sparse_rows(&m, 10.0);
        assert_eq!(out[(0, 0)], 1.0);

        let m = row_with_present(3, 30);
        let out = suppress_sparse_rows(&m, 10.0);
        assert_eq!(out[(0, 2)], 3.0);
    }

    #[test]
    fn below_ten_percent_is_blanked() {
        let m = row_with_present(1, 11);
        let out = suppress_sparse_rows(&m, 10.0);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rows_are_judged_independently() {
        let mut m = DMatrix::from_element(2, 20, MISSING);
        m[(0, 5)] = 7.0; // 5%
        for c in 0..4 {
            m[(1, c)] = 2.0; // 20%
        }
        let out = suppress_sparse_rows(&m, 10.0);
        assert!(out.row(0).iter().all(|v| v.is_nan()));
        assert_eq!(out.row(1).iter().filter(|v| !v.is_nan()).count(), 4);
    }

    #[test]
    fn well_covered_rows_pass_and_empty_rows_stay_empty() {
        let mut m = DMatrix::from_element(2, 10, MISSING);
        for c in 0..10 {
            m[(0, c)] = 3.0;
        }
        let out = suppress_sparse_rows(&m, 10.0);
        assert!(out.row(0).iter().all(|v| *v == 3.0));
        assert!(out.row(1).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn coverage_predicate() {
        assert!(!below_coverage(1, 10, 10.0));
        assert!(below_coverage(0, 10, 10.0));
        assert!(!below_coverage(0, 10, 0.0));
        assert!(below_coverage(9, 10, 100.0));
    }
}
