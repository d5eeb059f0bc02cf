//! Projection of a frequency-domain frame onto the kernel bank
//!
//! Pure arithmetic over the stored kernels, O(bins × n). No transform is
//! run here; callers hand in a spectrum, not time-domain samples.

use super::kernel::KernelBank;
use crate::error::{Result, TransformError};

impl KernelBank {
    /// Evaluate the first `output_real.len()` CQT bins
    ///
    /// out[k] = (1/n) · Σ_i in[i] · K_k[i], with
    /// re = Σ(in_re·k_re − in_im·k_im) and im = Σ(in_re·k_im + in_im·k_re).
    ///
    /// # Arguments
    /// * `input_real`, `input_imag` - Spectrum of length `self.size()`
    /// * `output_real`, `output_imag` - One slot per requested bin, at most
    ///   `self.bins()`
    pub fn evaluate(
        &self,
        input_real: &[f32],
        input_imag: &[f32],
        output_real: &mut [f32],
        output_imag: &mut [f32],
    ) -> Result<()> {
        let n = self.size();
        if input_real.len() != n {
            return Err(TransformError::KernelSizeMismatch {
                built: n,
                requested: input_real.len(),
            });
        }
        if input_imag.len() != n {
            return Err(TransformError::LengthMismatch {
                name: "input_imag",
                expected: n,
                got: input_imag.len(),
            });
        }

        let bins = output_real.len();
        if output_imag.len() != bins {
            return Err(TransformError::LengthMismatch {
                name: "output_imag",
                expected: bins,
                got: output_imag.len(),
            });
        }
        if bins > self.bins() {
            return Err(TransformError::BinCountExceeded {
                requested: bins,
                available: self.bins(),
            });
        }

        let inv_n = 1.0 / n as f32;
        let kernels = self.real().rows().into_iter().zip(self.imag().rows());
        for ((out_re, out_im), (k_re, k_im)) in output_real
            .iter_mut()
            .zip(output_imag.iter_mut())
            .zip(kernels)
        {
            let mut sum_re = 0.0f32;
            let mut sum_im = 0.0f32;
            for (((&x_re, &x_im), &kr), &ki) in input_real
                .iter()
                .zip(input_imag.iter())
                .zip(k_re.iter())
                .zip(k_im.iter())
            {
                sum_re += x_re * kr - x_im * ki;
                sum_im += x_re * ki + x_im * kr;
            }
            *out_re = sum_re * inv_n;
            *out_im = sum_im * inv_n;
        }

        Ok(())
    }
}
