//! Short-time Fourier transform on top of [`SpectrumAnalyzer`]
//!
//! Frames are `fft_size` samples long and advance by `hop_size`. The
//! inverse overlap-adds windowed frames and divides by the accumulated
//! squared window, which reconstructs the input for any window whose
//! overlapped squares never vanish.

use ndarray::{Array2, ArrayView2, Axis};
use num_complex::Complex32;

use crate::error::{Result, TransformError};
use crate::windows::{generate_window, WindowType};

use super::analysis::SpectrumAnalyzer;

/// Squared-window sums at or below this are left unnormalized
const WINDOW_SUM_FLOOR: f32 = 1e-9;

/// Framing options for [`SpectrumAnalyzer::stft`] and its inverse
#[derive(Debug, Clone, Copy, Default)]
pub struct StftOptions {
    /// Samples between frame starts, `fft_size / 2` when `None`
    pub hop_size: Option<usize>,

    /// Analysis and synthesis window
    pub window_type: WindowType,
}

impl StftOptions {
    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = Some(hop_size);
        self
    }

    pub fn with_window(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    fn resolve_hop(&self, fft_size: usize) -> Result<usize> {
        let hop = self.hop_size.unwrap_or(fft_size / 2);
        if hop == 0 {
            return Err(TransformError::InvalidParameter {
                name: "hop_size",
                reason: "must be positive",
            });
        }
        Ok(hop)
    }
}

/// Result of [`SpectrumAnalyzer::stft`]
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// |X| per frame, shape (time_bins, freq_bins)
    pub magnitudes: Array2<f32>,

    /// Full complex spectrum per frame, shape (time_bins, fft_size)
    pub frames: Array2<Complex32>,

    pub fft_size: usize,
    pub hop_size: usize,
    pub freq_bins: usize,
    pub time_bins: usize,

    /// Largest value in `magnitudes`
    pub max_magnitude: f32,
}

impl SpectrumAnalyzer {
    /// Short-time Fourier transform of `samples`
    ///
    /// Produces `(len - fft_size) / hop + 1` frames, at least one. Frames
    /// running past the end of the input are zero padded.
    pub fn stft(&mut self, samples: &[f32], options: &StftOptions) -> Result<Spectrogram> {
        if samples.is_empty() {
            return Err(TransformError::InvalidParameter {
                name: "samples",
                reason: "must not be empty",
            });
        }

        let fft_size = self.size();
        let hop_size = options.resolve_hop(fft_size)?;
        let freq_bins = self.num_bins();
        let time_bins = (samples.len().saturating_sub(fft_size) / hop_size + 1).max(1);
        let window = generate_window(options.window_type, fft_size);

        let mut magnitudes = Array2::<f32>::zeros((time_bins, freq_bins));
        let mut frames = Array2::<Complex32>::zeros((time_bins, fft_size));
        let mut max_magnitude = 0.0f32;

        for frame in 0..time_bins {
            let offset = frame * hop_size;
            let frame_len = fft_size.min(samples.len().saturating_sub(offset));

            self.real.fill(0.0);
            self.imag.fill(0.0);
            for ((dst, &sample), &w) in self.real[..frame_len]
                .iter_mut()
                .zip(&samples[offset..offset + frame_len])
                .zip(&window)
            {
                *dst = sample * w;
            }

            self.engine.forward_transform(&mut self.real, &mut self.imag)?;

            for (k, value) in frames.row_mut(frame).iter_mut().enumerate() {
                *value = Complex32::new(self.real[k], self.imag[k]);
            }
            for (k, mag) in magnitudes.row_mut(frame).iter_mut().enumerate() {
                *mag = (self.real[k] * self.real[k] + self.imag[k] * self.imag[k]).sqrt();
                max_magnitude = max_magnitude.max(*mag);
            }
        }

        Ok(Spectrogram {
            magnitudes,
            frames,
            fft_size,
            hop_size,
            freq_bins,
            time_bins,
            max_magnitude,
        })
    }

    /// Inverse STFT by windowed overlap-add
    ///
    /// # Arguments
    /// * `frames` - Complex spectra, shape (frames, fft_size)
    /// * `options` - Must match the options used for analysis
    ///
    /// # Returns
    /// `(frames - 1) * hop + fft_size` samples
    pub fn istft(&mut self, frames: ArrayView2<Complex32>, options: &StftOptions) -> Result<Vec<f32>> {
        let fft_size = self.size();
        let hop_size = options.resolve_hop(fft_size)?;

        let (frame_count, frame_len) = frames.dim();
        if frame_count == 0 {
            return Err(TransformError::InvalidParameter {
                name: "frames",
                reason: "must not be empty",
            });
        }
        if frame_len != fft_size {
            return Err(TransformError::LengthMismatch {
                name: "frames",
                expected: fft_size,
                got: frame_len,
            });
        }

        let window = generate_window(options.window_type, fft_size);
        let output_len = (frame_count - 1) * hop_size + fft_size;
        let mut output = vec![0.0f32; output_len];
        let mut window_sum = vec![0.0f32; output_len];

        for (index, frame) in frames.axis_iter(Axis(0)).enumerate() {
            for (k, value) in frame.iter().enumerate() {
                self.real[k] = value.re;
                self.imag[k] = value.im;
            }

            self.engine.inverse_transform(&mut self.real, &mut self.imag)?;

            let offset = index * hop_size;
            for (i, &w) in window.iter().enumerate() {
                output[offset + i] += self.real[i] * w;
                window_sum[offset + i] += w * w;
            }
        }

        for (sample, &sum) in output.iter_mut().zip(window_sum.iter()) {
            if sum > WINDOW_SUM_FLOOR {
                *sample /= sum;
            }
        }

        Ok(output)
    }

    /// Rebuild a signal from new magnitudes and the phase of `original`
    ///
    /// `magnitudes` has the shape of `original.magnitudes`. Bins above
    /// Nyquist are filled with conjugates so the result stays real.
    pub fn resynthesize(
        &mut self,
        magnitudes: ArrayView2<f32>,
        original: &Spectrogram,
        options: &StftOptions,
    ) -> Result<Vec<f32>> {
        if original.fft_size != self.size() {
            return Err(TransformError::SizeMismatch {
                initialized: self.size(),
                requested: original.fft_size,
            });
        }

        let fft_size = original.fft_size;
        let half = fft_size / 2;
        let time_bins = original.time_bins;

        if original.frames.dim() != (time_bins, fft_size) {
            return Err(TransformError::LengthMismatch {
                name: "original.frames",
                expected: time_bins * fft_size,
                got: original.frames.len(),
            });
        }
        if magnitudes.dim() != (time_bins, half + 1) {
            return Err(TransformError::LengthMismatch {
                name: "magnitudes",
                expected: time_bins * (half + 1),
                got: magnitudes.len(),
            });
        }

        let mut frames = Array2::<Complex32>::zeros((original.time_bins, fft_size));

        for ((mut row, source), mags) in frames
            .axis_iter_mut(Axis(0))
            .zip(original.frames.axis_iter(Axis(0)))
            .zip(magnitudes.axis_iter(Axis(0)))
        {
            for k in 0..=half {
                row[k] = Complex32::from_polar(mags[k], source[k].arg());
            }
            for k in 1..half {
                row[fft_size - k] = row[k].conj();
            }
        }

        self.istft(frames.view(), options)
    }
}
