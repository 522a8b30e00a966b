//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the missing-value sentinel and the shared `Shape` of a data block
//! - inputs (`Spectrogram`, `ParameterMatrix`, `Observation`)
//! - interpolated plasma envelopes and calibration constants (`CleaningConfig`)

pub mod types;

pub use types::*;
