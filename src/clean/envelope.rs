//! Plasma-frequency envelopes on the spectrogram time grid.
//!
//! Time column `j` of a data block is taken to sit at `baseline + j`, where
//! `baseline` is the first parameter time. Each of fce/flh/fpe is linearly
//! interpolated between control points and held flat beyond them.

use crate::domain::{ParameterMatrix, PlasmaEnvelopes};
use crate::math::{interp_all, linspace};

/// Resample fce/flh/fpe onto `length` unit-spaced time columns.
pub fn interpolate_envelopes(params: &ParameterMatrix, length: usize) -> PlasmaEnvelopes {
    let baseline = params.baseline();
    let queries = linspace(baseline, baseline + length as f64 - 1.0, length);
    let times = params.times();

    PlasmaEnvelopes {
        fce: interp_all(&queries, &times, &params.fce()),
        flh: interp_all(&queries, &times, &params.flh()),
        fpe: interp_all(&queries, &times, &params.fpe()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelopes_have_requested_length() {
        let params = ParameterMatrix::from_rows(&[[0.0, 50.0, 1.0, 30.0], [4.0, 90.0, 5.0, 70.0]]).unwrap();
        let env = interpolate_envelopes(&params, 5);
        assert_eq!(env.len(), 5);
        assert_eq!(env.fce, vec![50.0, 60.0, 70.0, 80.0, 90.0]);
        assert_eq!(env.flh, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(env.fpe, vec![30.0, 40.0, 50.0, 60.0, 70.0]);
        assert!(interpolate_envelopes(&params, 0).is_empty());
    }

    #[test]
    fn queries_past_last_control_point_are_clamped() {
        // Control points span 2 time units; 6 columns run past the end.
        let params = ParameterMatrix::from_rows(&[[10.0, 40.0, 2.0, 20.0], [12.0, 44.0, 4.0, 22.0]]).unwrap();
        let env = interpolate_envelopes(&params, 6);
        assert_eq!(env.fce, vec![40.0, 42.0, 44.0, 44.0, 44.0, 44.0]);
        assert_eq!(env.flh[5], 4.0);
        assert_eq!(env.fpe[0], 20.0);
    }

    #[test]
    fn baseline_anchors_column_zero() {
        // Irregular control spacing; column 3 is time 103.
        let params =
            ParameterMatrix::from_rows(&[[100.0, 10.0, 0.0, 1.0], [101.0, 20.0, 0.0, 1.0], [105.0, 60.0, 0.0, 1.0]])
                .unwrap();
        let env = interpolate_envelopes(&params, 4);
        assert!((env.fce[3] - 40.0).abs() < 1e-12);
    }
}
