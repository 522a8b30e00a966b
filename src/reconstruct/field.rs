//! Magnetic-field reconstruction `B = E * N^2 * scale`.

use nalgebra::DMatrix;

use crate::domain::{MISSING, Shape, is_missing};
use crate::error::Result;

/// B for one cell; missing if either operand is.
#[inline]
pub fn field_at(whistler: f64, n: f64, scale: f64) -> f64 {
    if is_missing(whistler) || is_missing(n) {
        return MISSING;
    }
    whistler * n.powi(2) * scale
}

/// Combine masked EFI amplitudes with N cell by cell.
pub fn reconstruct_field(whistler: &DMatrix<f64>, n: &DMatrix<f64>, scale: f64) -> Result<DMatrix<f64>> {
    Shape::of(whistler).ensure("field reconstruction", n)?;
    Ok(whistler.zip_map(n, |w, n_cell| field_at(w, n_cell, scale)))
}
