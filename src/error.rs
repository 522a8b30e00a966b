//! Crate error type.
//!
//! Only precondition violations are errors. Numeric singularities (zero local
//! standard deviation, a zero base in the refractive-index power) are not
//! reported here; they surface as NaN cells and flow through the pipeline as
//! missing values.

use thiserror::Error;

use crate::domain::Shape;

pub type Result<T> = std::result::Result<T, ReconError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconError {
    #[error("parameter matrix has no rows")]
    EmptyParameters,

    #[error("parameter time column is not sorted ascending (or not finite) at row {index}")]
    UnsortedParameterTime { index: usize },

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("spectrogram data block is empty (needs at least one row and one data column)")]
    EmptyDataBlock,

    #[error("{stage}: shape mismatch, expected {expected} but found {found}")]
    ShapeMismatch {
        stage: &'static str,
        expected: Shape,
        found: Shape,
    },

    #[error("SCM and EFI channel frequencies differ at row {row}")]
    ChannelMismatch { row: usize },

    #[error("time axis has {found} samples, data block has {expected} columns")]
    TimeAxisLength { expected: usize, found: usize },

    #[error("SCM/EFI timestamps disagree at sample {index}: scm={scm}, efi={efi}")]
    TimeAxisMismatch { index: usize, scm: f64, efi: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
