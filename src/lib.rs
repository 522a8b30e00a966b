//! `whistler-recon` library crate.
//!
//! Reconstructs whistler-mode magnetic field intensity from a search-coil
//! magnetometer (SCM) spectrogram, a co-registered electric-field (EFI)
//! spectrogram and the plasma frequencies fce/flh/fpe:
//!
//! - `clean` finds significant SCM cells and masks them to the whistler band
//! - `reconstruct` turns the masked EFI amplitudes into B via the refractive index
//! - `pipeline` runs both for one observation or a batch
//!
//! Missing cells are NaN ([`domain::MISSING`]) and stay missing through every
//! later stage.

pub mod clean;
pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod pipeline;
pub mod reconstruct;
pub mod report;

pub use domain::{CleaningConfig, Observation, ParameterMatrix, Shape, Spectrogram};
pub use error::{ReconError, Result};
pub use pipeline::{Reconstruction, reconstruct, reconstruct_batch};
