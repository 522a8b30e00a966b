//! Local z-score signal detection.
//!
//! Each channel row is scored against the statistics of a three-row window:
//! the row and its immediate neighbours, clipped at the top and bottom of the
//! spectrogram so edge rows use two rows. Mean and standard deviation skip
//! missing cells. A cell is a detection iff `z >= threshold`; a NaN z-score
//! (constant window, missing input) is never a detection.

use std::ops::Range;

use nalgebra::DMatrix;

use crate::domain::{MISSING, Spectrogram};
use crate::math::{nan_mean, nan_std};

/// Output of [`detect_outliers`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    /// Detected cells keep their value; everything else is missing.
    pub detections: DMatrix<f64>,
    /// `(row, column)` of every detection, row-major order.
    pub coords: Vec<(usize, usize)>,
    /// Raw z-score of every cell.
    pub z_scores: DMatrix<f64>,
}

/// Rows contributing to the statistics of row `row` out of `nrows`.
pub fn local_window(row: usize, nrows: usize) -> Range<usize> {
    row.saturating_sub(1)..(row + 2).min(nrows)
}

/// Flag statistically significant cells of the SCM data block.
pub fn detect_outliers(scm: &Spectrogram, threshold: f64) -> OutlierReport {
    let data = scm.data();
    let (nrows, ncols) = data.shape();

    let mut detections = DMatrix::from_element(nrows, ncols, MISSING);
    let mut z_scores = DMatrix::from_element(nrows, ncols, MISSING);
    let mut coords = Vec::new();
    let mut window = Vec::with_capacity(3 * ncols);

    for i in 0..nrows {
        window.clear();
        for r in local_window(i, nrows) {
            window.extend(data.row(r).iter().copied());
        }
        let mean = nan_mean(&window);
        let std = nan_std(&window);

        for j in 0..ncols {
            let value = data[(i, j)];
            let z = (value - mean) / std;
            z_scores[(i, j)] = z;
            if z >= threshold {
                detections[(i, j)] = value;
                coords.push((i, j));
            }
        }
    }

    log::debug!(
        "outlier detection: {} of {} cells at z >= {threshold}",
        coords.len(),
        nrows * ncols
    );

    OutlierReport {
        detections,
        coords,
        z_scores,
    }
}
