//! Numeric utilities: NaN-aware reductions and clamped linear interpolation.

pub mod interp;
pub mod nanstats;

pub use interp::*;
pub use nanstats::*;
