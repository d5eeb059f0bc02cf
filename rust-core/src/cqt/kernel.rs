//! CQT kernel bank construction
//!
//! Each bin gets a Hann-windowed complex exponential at its center
//! frequency, zero padded to the transform size and moved to the frequency
//! domain with the radix-2 forward transform.

use log::{debug, warn};
use ndarray::{Array2, ArrayView1};
use std::f32::consts::PI;

use super::config::CqtConfig;
use crate::error::{try_zeroed, Result, TransformError};
use crate::transform::{self, is_power_of_two, TransformState};
use crate::windows::{window_coefficient, WindowType};

/// Frequency-domain kernels, one row per CQT bin
///
/// Rows for bins at or above Nyquist are all zero.
#[derive(Debug, Clone)]
pub struct KernelBank {
    /// Transform size the kernels were built for
    size: usize,

    /// Parameters the bank was built from
    config: CqtConfig,

    /// Real parts, shape (total_bins, size)
    real: Array2<f32>,

    /// Imaginary parts, shape (total_bins, size)
    imag: Array2<f32>,
}

impl KernelBank {
    /// Build the kernel bank for `config` at transform size `n`
    ///
    /// # Arguments
    /// * `state` - Transform tables, used for one forward transform per bin
    /// * `config` - CQT parameters
    /// * `n` - Transform size (power of two)
    ///
    /// # Returns
    /// The bank, or the first failure. A failed forward transform aborts the
    /// whole build.
    pub fn build(state: &TransformState, config: &CqtConfig, n: usize) -> Result<Self> {
        config.validate()?;
        if !is_power_of_two(n) {
            return Err(TransformError::InvalidSize(n));
        }

        let total_bins = config.checked_total_bins()?;
        let cells = total_bins
            .checked_mul(n)
            .ok_or(TransformError::Allocation(usize::MAX))?;

        let mut real = Array2::from_shape_vec((total_bins, n), try_zeroed(cells)?)?;
        let mut imag = Array2::from_shape_vec((total_bins, n), try_zeroed(cells)?)?;
        let mut scratch_real: Vec<f32> = try_zeroed(n)?;
        let mut scratch_imag: Vec<f32> = try_zeroed(n)?;

        let q = config.quality_factor();
        let nyquist = config.nyquist();
        let mut silent_bins = 0;

        for bin in 0..total_bins {
            let freq = config.center_frequency(bin);
            if freq <= 0.0 || freq >= nyquist {
                silent_bins += 1;
                continue;
            }

            let filter_len = (q * config.sample_rate / freq).ceil().min(n as f32) as usize;
            if filter_len == 0 {
                silent_bins += 1;
                continue;
            }

            write_windowed_exponential(
                &mut scratch_real,
                &mut scratch_imag,
                filter_len,
                freq,
                config.sample_rate,
            );

            if let Err(err) = transform::forward(state, &mut scratch_real, &mut scratch_imag) {
                warn!("aborting CQT kernel build at bin {}: {}", bin, err);
                return Err(TransformError::KernelTransform {
                    bin,
                    source: Box::new(err),
                });
            }

            real.row_mut(bin)
                .iter_mut()
                .zip(scratch_real.iter())
                .for_each(|(dst, &src)| *dst = src);
            imag.row_mut(bin)
                .iter_mut()
                .zip(scratch_imag.iter())
                .for_each(|(dst, &src)| *dst = src);
        }

        debug!(
            "built {} CQT kernels for n = {} ({} above Nyquist)",
            total_bins, n, silent_bins
        );

        Ok(Self {
            size: n,
            config: *config,
            real,
            imag,
        })
    }

    /// Transform size the kernels were built for
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of kernels
    pub fn bins(&self) -> usize {
        self.real.nrows()
    }

    /// Parameters of the build that produced this bank
    pub fn config(&self) -> &CqtConfig {
        &self.config
    }

    /// Real and imaginary parts of the kernel for `bin`
    ///
    /// # Panics
    /// If `bin >= self.bins()`
    pub fn kernel(&self, bin: usize) -> (ArrayView1<'_, f32>, ArrayView1<'_, f32>) {
        (self.real.row(bin), self.imag.row(bin))
    }

    pub(crate) fn real(&self) -> &Array2<f32> {
        &self.real
    }

    pub(crate) fn imag(&self) -> &Array2<f32> {
        &self.imag
    }
}

/// Fill the scratch buffers with w[i]·exp(j·2π·freq·(i - (L-1)/2)/sampleRate)
/// for i < L and zeros after
fn write_windowed_exponential(
    real: &mut [f32],
    imag: &mut [f32],
    filter_len: usize,
    freq: f32,
    sample_rate: f32,
) {
    real.fill(0.0);
    imag.fill(0.0);

    let center = (filter_len as f32 - 1.0) / 2.0;
    for i in 0..filter_len {
        let window = window_coefficient(WindowType::Hann, i, filter_len);
        let phase = 2.0 * PI * freq * (i as f32 - center) / sample_rate;
        real[i] = window * phase.cos();
        imag[i] = window * phase.sin();
    }
}
