//! Projection of the cleaned SCM detection mask onto EFI amplitudes.
//!
//! The two instruments share the channel/time grid cell for cell, so a
//! detection at `(r, c)` in the SCM selects the EFI amplitude at `(r, c)`.

use nalgebra::DMatrix;

use crate::domain::{MISSING, Shape, Spectrogram, is_missing};
use crate::error::Result;

/// EFI amplitude wherever the cleaned SCM cell is present, missing elsewhere.
pub fn mask_efi(cleaned_scm: &DMatrix<f64>, efi: &Spectrogram) -> Result<DMatrix<f64>> {
    Shape::of(cleaned_scm).ensure("efi co-mask", efi.data())?;

    Ok(cleaned_scm.zip_map(efi.data(), |scm, e| if is_missing(scm) { MISSING } else { e }))
}
