//! Whistler-mode refractive index.
//!
//! `N(f, t) = (fpe(t) / f) * |fce(t) / f - 1|^(-1/2)`
//!
//! Evaluated for every channel and time column regardless of masking. At
//! `f == fce` the base of the power is zero and N is infinite; at `f == 0` the
//! result is NaN. Both propagate as-is.

use nalgebra::DMatrix;

use crate::clean::interpolate_envelopes;
use crate::domain::ParameterMatrix;

/// N for a single channel frequency and plasma state.
#[inline]
pub fn refractive_index_at(freq: f64, fce: f64, fpe: f64) -> f64 {
    (fpe / freq) * ((fce / freq) - 1.0).abs().powf(-0.5)
}

/// N for every `(channel, column)` of a data block `cols` wide.
pub fn refractive_index(params: &ParameterMatrix, channels: &[f64], cols: usize) -> DMatrix<f64> {
    let env = interpolate_envelopes(params, cols);
    DMatrix::from_fn(channels.len(), cols, |r, c| {
        refractive_index_at(channels[r], env.fce[c], env.fpe[c])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form() {
        // fce/f = 5 -> |5 - 1|^-0.5 = 0.5; fpe/f = 4.
        let n = refractive_index_at(10.0, 50.0, 40.0);
        assert!((n - 2.0).abs() < 1e-12, "expected 2, got {n}");
    }

    #[test]
    fn cyclotron_resonance_is_infinite() {
        let n = refractive_index_at(50.0, 50.0, 40.0);
        assert!(n.is_infinite());
        assert!(refractive_index_at(0.0, 50.0, 40.0).is_nan());
    }

    #[test]
    fn one_row_per_channel() {
        let params = ParameterMatrix::from_rows(&[[0.0, 50.0, 0.0, 40.0], [2.0, 90.0, 0.0, 40.0]]).unwrap();
        let n = refractive_index(&params, &[10.0, 20.0], 3);
        assert_eq!(n.shape(), (2, 3));
        assert!((n[(0, 0)] - 2.0).abs() < 1e-12);
        // Column 2: fce = 90, f = 10 -> (4) * 8^-0.5.
        assert!((n[(0, 2)] - 4.0 / 8.0_f64.sqrt()).abs() < 1e-12);
        // f = 20, fce = 50: (2) * 1.5^-0.5.
        assert!((n[(1, 0)] - 2.0 / 1.5_f64.sqrt()).abs() < 1e-12);
    }
}
