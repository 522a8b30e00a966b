//! SCM spectrogram cleaning.
//!
//! Responsibilities:
//!
//! - resample the plasma-frequency envelopes onto the spectrogram time grid
//! - flag significant cells with a locally windowed z-score
//! - blank channel rows with too few detections
//! - drop cells outside the `[flh, fce]` band
//!
//! [`clean_scm`] fixes the order of these stages.

pub mod bounds;
pub mod cleaner;
pub mod envelope;
pub mod outlier;
pub mod sparse;

pub use bounds::*;
pub use cleaner::*;
pub use envelope::*;
pub use outlier::*;
pub use sparse::*;
