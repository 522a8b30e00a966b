//! Input generation.

pub mod synthetic;

pub use synthetic::*;
