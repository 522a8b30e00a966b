//! Whistler-band masking against the lower-hybrid / cyclotron envelope.

use nalgebra::DMatrix;

use crate::clean::interpolate_envelopes;
use crate::domain::{MISSING, ParameterMatrix, Spectrogram};
use crate::error::Result;

/// Inclusive band test `flh <= f <= fce`. NaN anywhere fails.
#[inline]
pub fn within_band(freq: f64, flh: f64, fce: f64) -> bool {
    flh <= freq && freq <= fce
}

/// Keep a cell only while its channel frequency lies inside the band at that
/// time column.
///
/// `scm` supplies the channel frequencies and the column count used to
/// resample the envelopes; `suppressed` must share its data-block shape.
pub fn filter_outside_bounds(
    suppressed: &DMatrix<f64>,
    params: &ParameterMatrix,
    scm: &Spectrogram,
) -> Result<DMatrix<f64>> {
    let shape = scm.shape();
    shape.ensure("bounds filter", suppressed)?;

    let env = interpolate_envelopes(params, shape.cols);
    let channels = scm.channels();

    let out = DMatrix::from_fn(shape.rows, shape.cols, |r, c| {
        if within_band(channels[r], env.flh[c], env.fce[c]) {
            suppressed[(r, c)]
        } else {
            MISSING
        }
    });

    log::debug!(
        "bounds filter: {} present cells before, {} after",
        suppressed.iter().filter(|v| !v.is_nan()).count(),
        out.iter().filter(|v| !v.is_nan()).count()
    );
    Ok(out)
}
