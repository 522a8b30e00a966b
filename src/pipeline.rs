//! End-to-end reconstruction.
//!
//! Keeping the workflow in one place fixes the stage order:
//! input checks -> SCM cleaning -> EFI co-mask -> N -> B
//!
//! Each stage allocates a fresh matrix of the SCM data-block shape and the
//! previous stage's output is only read. A run is a pure function of its
//! `Observation` and `CleaningConfig`, so independent observations can be
//! processed in parallel with [`reconstruct_batch`].

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::clean::{CleanedScm, clean_scm};
use crate::domain::{CleaningConfig, Observation, Shape, Spectrogram};
use crate::error::{ReconError, Result};
use crate::reconstruct::{mask_efi, reconstruct_field, refractive_index};
use crate::report::summarize;

/// All computed outputs of one reconstruction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub shape: Shape,
    pub cleaning: CleanedScm,
    /// EFI amplitudes under the cleaned SCM mask.
    pub whistler: DMatrix<f64>,
    pub refractive_index: DMatrix<f64>,
    /// Reconstructed magnetic field, indexed `[channel, time]`.
    pub field: DMatrix<f64>,
}

/// Verify that the SCM and EFI time axes describe the same `width` columns.
///
/// Two empty axes cannot be checked; the spectrograms are then trusted to
/// share a grid and a warning is logged.
pub fn check_time_alignment(scm_times: &[f64], efi_times: &[f64], width: usize, tolerance: f64) -> Result<()> {
    if scm_times.is_empty() && efi_times.is_empty() {
        log::warn!("no SCM/EFI timestamps supplied; time alignment not verified");
        return Ok(());
    }
    for times in [scm_times, efi_times] {
        if times.len() != width {
            return Err(ReconError::TimeAxisLength {
                expected: width,
                found: times.len(),
            });
        }
    }
    for (index, (&scm, &efi)) in scm_times.iter().zip(efi_times).enumerate() {
        let agree = (scm - efi).abs() <= tolerance;
        if !agree {
            return Err(ReconError::TimeAxisMismatch { index, scm, efi });
        }
    }
    Ok(())
}

/// SCM and EFI must share channel frequencies and data-block shape.
pub fn check_channels(scm: &Spectrogram, efi: &Spectrogram) -> Result<()> {
    scm.shape().ensure("efi spectrogram", efi.data())?;
    for (row, (a, b)) in scm.channels().iter().zip(efi.channels()).enumerate() {
        if a != b {
            return Err(ReconError::ChannelMismatch { row });
        }
    }
    Ok(())
}

/// Run the full pipeline on one observation.
pub fn reconstruct(obs: &Observation, config: &CleaningConfig) -> Result<Reconstruction> {
    config.validate()?;
    check_channels(&obs.scm, &obs.efi)?;

    let shape = obs.scm.shape();
    if config.verify_time_alignment {
        check_time_alignment(&obs.scm_times, &obs.efi_times, shape.cols, config.time_tolerance)?;
    }

    let cleaning = clean_scm(&obs.params, &obs.scm, config)?;
    let whistler = mask_efi(&cleaning.cleaned, &obs.efi)?;
    let refractive_index = refractive_index(&obs.params, obs.scm.channels(), shape.cols);
    let field = reconstruct_field(&whistler, &refractive_index, config.field_scale)?;

    let out = Reconstruction {
        shape,
        cleaning,
        whistler,
        refractive_index,
        field,
    };

    let summary = summarize(&out);
    log::info!(
        "reconstructed {} grid: {} detections, {} cells kept ({:.1}%), {} channels with signal",
        summary.shape,
        summary.outliers,
        summary.cleaned_cells,
        summary.coverage_pct,
        summary.rows_with_signal
    );

    Ok(out)
}

/// Reconstruct independent observations in parallel; results keep input order.
pub fn reconstruct_batch(observations: &[Observation], config: &CleaningConfig) -> Vec<Result<Reconstruction>> {
    observations
        .par_iter()
        .map(|obs| reconstruct(obs, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterMatrix;

    fn obs(scm_rows: &[Vec<f64>], efi_rows: &[Vec<f64>]) -> Observation {
        let params = ParameterMatrix::from_rows(&[[0.0, 50.0, 0.0, 40.0], [10.0, 50.0, 0.0, 40.0]]).unwrap();
        Observation::new(
            params,
            Spectrogram::from_rows(scm_rows).unwrap(),
            Spectrogram::from_rows(efi_rows).unwrap(),
        )
    }

    #[test]
    fn alignment_accepts_matching_axes() {
        assert!(check_time_alignment(&[0.0, 1.0], &[0.0, 1.0], 2, 0.0).is_ok());
        assert!(check_time_alignment(&[0.0, 1.0], &[0.05, 1.0], 2, 0.1).is_ok());
        assert!(check_time_alignment(&[], &[], 2, 0.0).is_ok());
    }

    #[test]
    fn alignment_rejects_drift_and_length() {
        assert_eq!(
            check_time_alignment(&[0.0, 1.0], &[0.0, 1.5], 2, 0.1).unwrap_err(),
            ReconError::TimeAxisMismatch {
                index: 1,
                scm: 1.0,
                efi: 1.5
            }
        );
        assert_eq!(
            check_time_alignment(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 2, 0.0).unwrap_err(),
            ReconError::TimeAxisLength { expected: 2, found: 3 }
        );
        assert!(check_time_alignment(&[0.0, 1.0], &[], 2, 0.0).is_err());
        assert!(check_time_alignment(&[0.0, f64::NAN], &[0.0, 1.0], 2, 1.0).is_err());
    }

    #[test]
    fn channel_mismatch_is_reported() {
        let o = obs(&[vec![10.0, 1.0, 2.0]], &[vec![11.0, 1.0, 2.0]]);
        let err = reconstruct(&o, &CleaningConfig::default()).unwrap_err();
        assert_eq!(err, ReconError::ChannelMismatch { row: 0 });
    }

    #[test]
    fn misaligned_times_can_be_ignored() {
        let o = obs(&[vec![10.0, 1.0, 100.0, 1.0]], &[vec![10.0, 9.0, 9.0, 9.0]])
            .with_times(vec![0.0, 1.0, 2.0], vec![5.0, 6.0, 7.0]);
        assert!(reconstruct(&o, &CleaningConfig::default()).is_err());

        let lenient = CleaningConfig {
            verify_time_alignment: false,
            ..CleaningConfig::default()
        };
        let out = reconstruct(&o, &lenient).unwrap();
        assert_eq!(out.shape, Shape::new(1, 3));
    }

    #[test]
    fn single_detection_reconstructs_reference_value() {
        // One row, f = 10, fce = 50, fpe = 40: N = 2 everywhere. The middle
        // cell is the only detection (z = 1.41) and covers 33% of the row.
        let o = obs(&[vec![10.0, 1.0, 100.0, 1.0]], &[vec![10.0, 3.0, 9.0, 3.0]]);
        let out = reconstruct(&o, &CleaningConfig::default()).unwrap();

        assert_eq!(out.cleaning.outliers.coords, vec![(0, 1)]);
        assert!(out.whistler[(0, 0)].is_nan());
        assert_eq!(out.whistler[(0, 1)], 9.0);
        assert!((out.refractive_index[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((out.field[(0, 1)] - 400.0).abs() < 1e-9);
        assert!(out.field[(0, 0)].is_nan());
        assert!(out.field[(0, 2)].is_nan());
    }
}
