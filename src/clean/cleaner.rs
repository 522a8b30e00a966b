//! SCM cleaning: outlier detection -> sparse-row suppression -> band masking.

use nalgebra::DMatrix;

use crate::clean::{OutlierReport, detect_outliers, filter_outside_bounds, suppress_sparse_rows};
use crate::domain::{CleaningConfig, ParameterMatrix, Spectrogram};
use crate::error::Result;

/// Every intermediate of one cleaning pass.
///
/// All three matrices share the SCM data-block shape, and a cell missing in
/// one stage is missing in every later one.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedScm {
    pub outliers: OutlierReport,
    pub suppressed: DMatrix<f64>,
    pub cleaned: DMatrix<f64>,
}

/// Run the three cleaning stages in order.
pub fn clean_scm(params: &ParameterMatrix, scm: &Spectrogram, config: &CleaningConfig) -> Result<CleanedScm> {
    config.validate()?;

    let outliers = detect_outliers(scm, config.z_threshold);
    let suppressed = suppress_sparse_rows(&outliers.detections, config.min_row_coverage_pct);
    let cleaned = filter_outside_bounds(&suppressed, params, scm)?;

    Ok(CleanedScm {
        outliers,
        suppressed,
        cleaned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Shape;

    #[test]
    fn stages_share_shape_and_only_lose_cells() {
        let scm = Spectrogram::from_rows(&[
            vec![5.0, 1.0, 1.0, 9.0, 1.0, 1.0],
            vec![10.0, 1.0, 8.0, 1.0, 1.0, 7.0],
            vec![80.0, 9.0, 1.0, 1.0, 9.0, 1.0],
        ])
        .unwrap();
        let params = ParameterMatrix::from_rows(&[[0.0, 50.0, 2.0, 30.0], [4.0, 50.0, 2.0, 30.0]]).unwrap();
        let out = clean_scm(&params, &scm, &CleaningConfig::default()).unwrap();

        let shape = Shape::new(3, 5);
        for m in [&out.outliers.detections, &out.suppressed, &out.cleaned] {
            assert_eq!(Shape::of(m), shape);
        }
        for (i, v) in out.cleaned.iter().enumerate() {
            if out.suppressed.as_slice()[i].is_nan() {
                assert!(v.is_nan());
            }
        }
        // Channel 80 sits above fce = 50 everywhere.
        assert!(out.cleaned.row(2).iter().all(|v| v.is_nan()));
        // Channels 5 and 10 keep their detections.
        assert_eq!(out.cleaned[(0, 2)], 9.0);
        assert_eq!(out.cleaned[(1, 1)], 8.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let scm = Spectrogram::from_rows(&[vec![5.0, 1.0]]).unwrap();
        let params = ParameterMatrix::from_rows(&[[0.0, 50.0, 2.0, 30.0]]).unwrap();
        let cfg = CleaningConfig {
            z_threshold: f64::NAN,
            ..CleaningConfig::default()
        };
        assert!(clean_scm(&params, &scm, &cfg).is_err());
    }
}
