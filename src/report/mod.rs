//! Reporting utilities: detection counts and field statistics.

use serde::{Deserialize, Serialize};

use crate::domain::{Shape, is_missing};
use crate::pipeline::Reconstruction;

/// Statistics over the finite cells of the reconstructed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Read-only digest of a reconstruction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionSummary {
    pub shape: Shape,
    /// Cells flagged by the z-score detector.
    pub outliers: usize,
    /// Rows that had detections but were blanked for low coverage.
    pub suppressed_rows: usize,
    /// Cells surviving all cleaning stages.
    pub cleaned_cells: usize,
    /// `cleaned_cells` as a percentage of the grid.
    pub coverage_pct: f64,
    /// Channels with at least one surviving cell.
    pub rows_with_signal: usize,
    /// `None` when no cell of B is finite.
    pub field: Option<FieldStats>,
}

/// Compute min/max/mean over the finite values, or `None` if there are none.
pub fn field_stats<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<FieldStats> {
    let mut n = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        n += 1;
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    if n == 0 {
        return None;
    }
    Some(FieldStats {
        n,
        min,
        max,
        mean: sum / n as f64,
    })
}

pub fn summarize(rec: &Reconstruction) -> ReconstructionSummary {
    let detections = &rec.cleaning.outliers.detections;
    let suppressed = &rec.cleaning.suppressed;
    let cleaned = &rec.cleaning.cleaned;

    let suppressed_rows = (0..rec.shape.rows)
        .filter(|&r| {
            detections.row(r).iter().any(|v| !is_missing(*v)) && suppressed.row(r).iter().all(|v| is_missing(*v))
        })
        .count();
    let cleaned_cells = cleaned.iter().filter(|v| !is_missing(**v)).count();
    let rows_with_signal = (0..rec.shape.rows)
        .filter(|&r| cleaned.row(r).iter().any(|v| !is_missing(*v)))
        .count();
    let cells = rec.shape.cells();
    let coverage_pct = if cells == 0 {
        0.0
    } else {
        cleaned_cells as f64 * 100.0 / cells as f64
    };

    ReconstructionSummary {
        shape: rec.shape,
        outliers: rec.cleaning.outliers.coords.len(),
        suppressed_rows,
        cleaned_cells,
        coverage_pct,
        rows_with_signal,
        field: field_stats(rec.field.iter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_stats_skip_missing_and_infinite() {
        let v = [f64::NAN, 2.0, f64::INFINITY, 4.0];
        let s = field_stats(v.iter()).unwrap();
        assert_eq!(s.n, 2);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.mean, 3.0);
        assert!(field_stats([f64::NAN].iter()).is_none());
    }
}
