//! Synthetic SCM/EFI observations for smoke tests.
//!
//! The background is log-normal noise around a flat power level. A single
//! falling-tone whistler track steps down through the in-band channels, one
//! cell per time column, so every in-band channel carries a run of roughly
//! `n_samples / band_rows` track cells. The EFI grid is the SCM grid scaled by
//! `efi_scale`.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::domain::{Observation, ParameterMatrix, Spectrogram};
use crate::error::{ReconError, Result};
use crate::math::linspace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSpec {
    pub seed: u64,
    pub n_channels: usize,
    pub n_samples: usize,
    pub f_min: f64,
    pub f_max: f64,
    pub fce: f64,
    pub flh: f64,
    pub fpe: f64,
    pub background: f64,
    /// Log-space standard deviation of the background.
    pub noise_sigma: f64,
    /// Power added on top of the background along the track.
    pub track_power: f64,
    pub efi_scale: f64,
    pub t0: f64,
    pub cadence: f64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            seed: 42,
            n_channels: 12,
            n_samples: 60,
            f_min: 100.0,
            f_max: 1200.0,
            fce: 950.0,
            flh: 250.0,
            fpe: 3000.0,
            background: 1.0,
            noise_sigma: 0.3,
            track_power: 50.0,
            efi_scale: 1e-3,
            t0: 0.0,
            cadence: 1.0,
        }
    }
}

impl SyntheticSpec {
    pub fn channels(&self) -> Vec<f64> {
        linspace(self.f_min, self.f_max, self.n_channels)
    }

    /// First and last channel index inside `[flh, fce]`.
    pub fn band_rows(&self) -> Option<(usize, usize)> {
        let channels = self.channels();
        let lo = channels.iter().position(|&f| f >= self.flh)?;
        let hi = channels.iter().rposition(|&f| f <= self.fce)?;
        (lo <= hi).then_some((lo, hi))
    }

    /// Channel carrying the whistler track at time column `col`.
    pub fn track_row(&self, col: usize) -> Option<usize> {
        if self.n_samples == 0 {
            return None;
        }
        let (lo, hi) = self.band_rows()?;
        let band = hi - lo + 1;
        Some(hi - (col * band / self.n_samples).min(band - 1))
    }
}

pub fn synthetic_observation(spec: &SyntheticSpec) -> Result<Observation> {
    if spec.n_channels == 0 || spec.n_samples == 0 {
        return Err(ReconError::InvalidConfig(
            "synthetic grid needs at least one channel and one sample".into(),
        ));
    }
    if !(spec.f_min.is_finite() && spec.f_max.is_finite() && spec.f_min > 0.0 && spec.f_max > spec.f_min) {
        return Err(ReconError::InvalidConfig(format!(
            "invalid channel range {}..{}",
            spec.f_min, spec.f_max
        )));
    }
    if spec.band_rows().is_none() {
        return Err(ReconError::InvalidConfig(
            "no channel lies inside the [flh, fce] band".into(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise_sigma)
        .map_err(|e| ReconError::InvalidConfig(format!("noise distribution error: {e}")))?;

    let channels = spec.channels();
    let mut scm_rows = Vec::with_capacity(spec.n_channels);
    let mut efi_rows = Vec::with_capacity(spec.n_channels);
    for (r, &f) in channels.iter().enumerate() {
        let mut scm = Vec::with_capacity(spec.n_samples + 1);
        let mut efi = Vec::with_capacity(spec.n_samples + 1);
        scm.push(f);
        efi.push(f);
        for c in 0..spec.n_samples {
            let mut power = spec.background * normal.sample(&mut rng).exp();
            if spec.track_row(c) == Some(r) {
                power += spec.track_power;
            }
            scm.push(power);
            efi.push(power * spec.efi_scale);
        }
        scm_rows.push(scm);
        efi_rows.push(efi);
    }

    let last = spec.n_samples as f64 - 1.0;
    let params = ParameterMatrix::from_rows(&[
        [spec.t0, spec.fce, spec.flh, spec.fpe],
        [spec.t0 + last, spec.fce, spec.flh, spec.fpe],
    ])?;
    let times: Vec<f64> = (0..spec.n_samples)
        .map(|c| spec.t0 + spec.cadence * c as f64)
        .collect();

    Ok(Observation::new(
        params,
        Spectrogram::from_rows(&scm_rows)?,
        Spectrogram::from_rows(&efi_rows)?,
    )
    .with_times(times.clone(), times))
}
