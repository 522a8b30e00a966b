//! Physical reconstruction from cleaned detections.
//!
//! The cleaned SCM mask selects EFI amplitudes, the plasma envelopes give the
//! refractive index N, and the two combine into the magnetic field B.

pub mod comask;
pub mod field;
pub mod refractive;

pub use comask::*;
pub use field::*;
pub use refractive::*;
