//! Shared domain types.
//!
//! Every matrix in the pipeline is a `DMatrix<f64>` laid out as
//! `rows = frequency channels`, `columns = time samples`. The spectrogram
//! channel column is split off at construction so stages never see it mixed
//! in with data.

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};

/// Marker for "no valid value at this cell".
///
/// NaN compares false against every threshold and bound, and the NaN-aware
/// reductions in [`crate::math`] skip it explicitly.
pub const MISSING: f64 = f64::NAN;

/// True if a cell holds the missing marker.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Number of channel rows and time columns of a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn of(matrix: &DMatrix<f64>) -> Self {
        Self::new(matrix.nrows(), matrix.ncols())
    }

    pub fn cells(self) -> usize {
        self.rows * self.cols
    }

    /// Fail with `ShapeMismatch` unless `matrix` has exactly this shape.
    pub fn ensure(self, stage: &'static str, matrix: &DMatrix<f64>) -> Result<()> {
        let found = Self::of(matrix);
        if found != self {
            return Err(ReconError::ShapeMismatch {
                stage,
                expected: self,
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A frequency-by-time spectrogram (SCM power or EFI amplitude).
///
/// The channel frequencies are fixed at construction and only exposed by
/// shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    channels: Vec<f64>,
    data: DMatrix<f64>,
}

impl Spectrogram {
    pub fn new(channels: Vec<f64>, data: DMatrix<f64>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(ReconError::EmptyDataBlock);
        }
        if channels.len() != data.nrows() {
            return Err(ReconError::ShapeMismatch {
                stage: "spectrogram",
                expected: Shape::new(channels.len(), data.ncols()),
                found: Shape::of(&data),
            });
        }
        Ok(Self { channels, data })
    }

    /// Build from raw rows where element 0 is the channel frequency and the
    /// remaining elements are samples over time.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(ReconError::EmptyDataBlock);
        };
        let width = first.len();
        if width < 2 {
            return Err(ReconError::EmptyDataBlock);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(ReconError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
        }

        let channels = rows.iter().map(|r| r[0]).collect();
        let data = DMatrix::from_fn(rows.len(), width - 1, |r, c| rows[r][c + 1]);
        Ok(Self { channels, data })
    }

    pub fn channels(&self) -> &[f64] {
        &self.channels
    }

    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn shape(&self) -> Shape {
        Shape::of(&self.data)
    }
}

/// One low-rate plasma parameter sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRow {
    pub time: f64,
    /// Electron cyclotron frequency.
    pub fce: f64,
    /// Lower-hybrid frequency.
    pub flh: f64,
    /// Electron plasma frequency.
    pub fpe: f64,
}

/// Interpolation control points `[time, fce, flh, fpe]`, sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMatrix {
    rows: Vec<ParamRow>,
}

impl ParameterMatrix {
    pub fn new(rows: Vec<ParamRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(ReconError::EmptyParameters);
        }
        for (index, row) in rows.iter().enumerate() {
            if !row.time.is_finite() {
                return Err(ReconError::UnsortedParameterTime { index });
            }
            if index > 0 && row.time < rows[index - 1].time {
                return Err(ReconError::UnsortedParameterTime { index });
            }
        }
        Ok(Self { rows })
    }

    pub fn from_rows(rows: &[[f64; 4]]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|&[time, fce, flh, fpe]| ParamRow {
                    time,
                    fce,
                    flh,
                    fpe,
                })
                .collect(),
        )
    }

    /// Build from loosely-typed rows, each of which must hold exactly four values.
    pub fn from_vecs(rows: &[Vec<f64>]) -> Result<Self> {
        let mut fixed = Vec::with_capacity(rows.len());
        for (row, values) in rows.iter().enumerate() {
            let arr: [f64; 4] = values
                .as_slice()
                .try_into()
                .map_err(|_| ReconError::RaggedRow {
                    row,
                    expected: 4,
                    found: values.len(),
                })?;
            fixed.push(arr);
        }
        Self::from_rows(&fixed)
    }

    pub fn rows(&self) -> &[ParamRow] {
        &self.rows
    }

    /// Time of the first control point; query index 0 maps here.
    pub fn baseline(&self) -> f64 {
        self.rows[0].time
    }

    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.time).collect()
    }

    pub fn fce(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.fce).collect()
    }

    pub fn flh(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.flh).collect()
    }

    pub fn fpe(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.fpe).collect()
    }
}

/// Plasma frequencies resampled onto the data-block time columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PlasmaEnvelopes {
    pub fce: Vec<f64>,
    pub flh: Vec<f64>,
    pub fpe: Vec<f64>,
}

impl PlasmaEnvelopes {
    pub fn len(&self) -> usize {
        self.fce.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fce.is_empty()
    }
}

/// Calibration constants for the SCM/EFI instrument pair.
///
/// `Default` reproduces the fixed instrument calibration. Serializable so a
/// run can be reported alongside its constants; not loadable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleaningConfig {
    /// A cell is a detection iff its local z-score is `>=` this value.
    pub z_threshold: f64,
    /// Rows with a lower percentage of detections are blanked.
    pub min_row_coverage_pct: f64,
    /// Unit conversion applied in `B = E * N^2 * field_scale`.
    pub field_scale: f64,
    /// Compare SCM and EFI timestamps before combining the instruments.
    pub verify_time_alignment: bool,
    /// Largest accepted |scm_time - efi_time|.
    pub time_tolerance: f64,
}

pub const DEFAULT_Z_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MIN_ROW_COVERAGE_PCT: f64 = 10.0;
pub const DEFAULT_FIELD_SCALE: f64 = 100.0 / 9.0;

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
            min_row_coverage_pct: DEFAULT_MIN_ROW_COVERAGE_PCT,
            field_scale: DEFAULT_FIELD_SCALE,
            verify_time_alignment: true,
            time_tolerance: 0.0,
        }
    }
}

impl CleaningConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.z_threshold.is_finite() {
            return Err(ReconError::InvalidConfig(format!(
                "z_threshold must be finite, got {}",
                self.z_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.min_row_coverage_pct) {
            return Err(ReconError::InvalidConfig(format!(
                "min_row_coverage_pct must be within [0, 100], got {}",
                self.min_row_coverage_pct
            )));
        }
        if !self.field_scale.is_finite() {
            return Err(ReconError::InvalidConfig(format!(
                "field_scale must be finite, got {}",
                self.field_scale
            )));
        }
        if !(self.time_tolerance.is_finite() && self.time_tolerance >= 0.0) {
            return Err(ReconError::InvalidConfig(format!(
                "time_tolerance must be finite and >= 0, got {}",
                self.time_tolerance
            )));
        }
        Ok(())
    }
}

/// All inputs of one reconstruction run.
///
/// Timestamps may be left empty when the caller has none; alignment is then
/// unverifiable and the two spectrograms are trusted to share a time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub params: ParameterMatrix,
    pub scm: Spectrogram,
    pub scm_times: Vec<f64>,
    pub efi: Spectrogram,
    pub efi_times: Vec<f64>,
}

impl Observation {
    pub fn new(params: ParameterMatrix, scm: Spectrogram, efi: Spectrogram) -> Self {
        Self {
            params,
            scm,
            scm_times: Vec::new(),
            efi,
            efi_times: Vec::new(),
        }
    }

    pub fn with_times(mut self, scm_times: Vec<f64>, efi_times: Vec<f64>) -> Self {
        self.scm_times = scm_times;
        self.efi_times = efi_times;
        self
    }
}
