//! High-level spectrum analyzer
//!
//! Owns a [`SpectralEngine`] sized to the analysis frame and reusable
//! scratch buffers, and layers real-input FFTs, magnitude spectra, resizing
//! and the time-domain CQT path on top of it.

use log::debug;
use num_complex::Complex32;

#[cfg(feature = "cqt")]
use crate::cqt::CqtConfig;
use crate::engine::SpectralEngine;
use crate::error::{Result, TransformError};
use crate::transform::is_power_of_two;
use crate::windows::{generate_window, WindowType};

use super::windowing::{apply_window_inplace, window_correction_factor};

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT size (number of samples, power of 2)
    pub fft_size: usize,

    /// Window type for `analyze` and STFT defaults
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f32,

    /// Apply amplitude correction for windowing
    pub apply_correction: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window_type: WindowType::Hann,
            sample_rate: 44100.0,
            apply_correction: true,
        }
    }
}

/// Split-complex spectrum (or signal) of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSpectrum {
    pub real: Vec<f32>,
    pub imag: Vec<f32>,
}

impl ComplexSpectrum {
    /// All-zero spectrum of `len` bins
    pub fn zeros(len: usize) -> Self {
        Self {
            real: vec![0.0; len],
            imag: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// |X[k]| for every bin
    pub fn magnitudes(&self) -> Vec<f32> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(re, im)| (re * re + im * im).sqrt())
            .collect()
    }

    /// Interleave into complex values
    pub fn to_complex(&self) -> Vec<Complex32> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(&re, &im)| Complex32::new(re, im))
            .collect()
    }
}

/// Real-time spectrum analyzer
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    pub(super) engine: SpectralEngine,

    /// Reusable transform buffers, `fft_size` long
    pub(super) real: Vec<f32>,
    pub(super) imag: Vec<f32>,

    /// Analysis window for `analyze`
    window: Vec<f32>,
    correction_factor: f32,

    #[cfg(feature = "cqt")]
    cqt_config: Option<CqtConfig>,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// Fails if `config.fft_size` is not a power of two.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(config.fft_size)?;

        let mut analyzer = Self {
            engine,
            real: Vec::new(),
            imag: Vec::new(),
            window: Vec::new(),
            correction_factor: 1.0,
            config,
            #[cfg(feature = "cqt")]
            cqt_config: None,
        };
        analyzer.allocate_buffers();
        Ok(analyzer)
    }

    /// Check if `size` is usable as an FFT size
    pub fn is_valid_size(size: usize) -> bool {
        is_power_of_two(size)
    }

    fn allocate_buffers(&mut self) {
        let n = self.config.fft_size;
        self.real = vec![0.0; n];
        self.imag = vec![0.0; n];
        self.window = generate_window(self.config.window_type, n);
        self.correction_factor = if self.config.apply_correction {
            window_correction_factor(self.config.window_type, n)
        } else {
            1.0
        };
    }

    fn check_len(&self, name: &'static str, buffer: &[f32]) -> Result<()> {
        if buffer.len() != self.config.fft_size {
            return Err(TransformError::LengthMismatch {
                name,
                expected: self.config.fft_size,
                got: buffer.len(),
            });
        }
        Ok(())
    }

    fn take_spectrum(&self) -> ComplexSpectrum {
        ComplexSpectrum {
            real: self.real.clone(),
            imag: self.imag.clone(),
        }
    }

    /// Forward FFT of a real-valued frame
    ///
    /// # Arguments
    /// * `input_real` - Samples, length must equal the FFT size
    pub fn fft(&mut self, input_real: &[f32]) -> Result<ComplexSpectrum> {
        self.check_len("input_real", input_real)?;

        self.real.copy_from_slice(input_real);
        self.imag.fill(0.0);
        self.engine.forward_transform(&mut self.real, &mut self.imag)?;

        Ok(self.take_spectrum())
    }

    /// Forward FFT of a complex frame
    pub fn fft_complex(&mut self, input_real: &[f32], input_imag: &[f32]) -> Result<ComplexSpectrum> {
        self.check_len("input_real", input_real)?;
        self.check_len("input_imag", input_imag)?;

        self.real.copy_from_slice(input_real);
        self.imag.copy_from_slice(input_imag);
        self.engine.forward_transform(&mut self.real, &mut self.imag)?;

        Ok(self.take_spectrum())
    }

    /// Inverse FFT (scaled by 1/n)
    pub fn ifft(&mut self, input_real: &[f32], input_imag: &[f32]) -> Result<ComplexSpectrum> {
        self.check_len("input_real", input_real)?;
        self.check_len("input_imag", input_imag)?;

        self.real.copy_from_slice(input_real);
        self.imag.copy_from_slice(input_imag);
        self.engine.inverse_transform(&mut self.real, &mut self.imag)?;

        Ok(self.take_spectrum())
    }

    /// Magnitude of bins 0..=n/2 of a full spectrum
    pub fn magnitude_spectrum(&self, spectrum: &ComplexSpectrum) -> Result<Vec<f32>> {
        let bins = self.num_bins();
        if spectrum.real.len() < bins || spectrum.imag.len() < bins {
            return Err(TransformError::LengthMismatch {
                name: "spectrum",
                expected: bins,
                got: spectrum.real.len().min(spectrum.imag.len()),
            });
        }

        Ok(spectrum.real[..bins]
            .iter()
            .zip(spectrum.imag[..bins].iter())
            .map(|(re, im)| (re * re + im * im).sqrt())
            .collect())
    }

    /// Analyze signal and return magnitude spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded or truncated to fft_size)
    ///
    /// # Returns
    /// Windowed magnitude spectrum |X[k]| for k = 0..=fft_size/2
    pub fn analyze(&mut self, signal: &[f32]) -> Result<Vec<f32>> {
        let copy_len = signal.len().min(self.config.fft_size);
        self.real[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.real[copy_len..].fill(0.0);
        self.imag.fill(0.0);

        apply_window_inplace(&mut self.real, &self.window);
        self.engine.forward_transform(&mut self.real, &mut self.imag)?;

        let bins = self.num_bins();
        let correction = self.correction_factor;
        Ok(self.real[..bins]
            .iter()
            .zip(self.imag[..bins].iter())
            .map(|(re, im)| (re * re + im * im).sqrt() * correction)
            .collect())
    }

    /// Analyze and return magnitude in dB
    ///
    /// # Arguments
    /// * `signal` - Input signal
    /// * `reference` - Reference level for dB (1.0 for dBFS-style output)
    ///
    /// # Returns
    /// 20*log10(|X[k]|/reference), floored at 1e-10 before the log
    pub fn analyze_db(&mut self, signal: &[f32], reference: f32) -> Result<Vec<f32>> {
        let spectrum = self.analyze(signal)?;
        Ok(spectrum
            .iter()
            .map(|&mag| {
                let mag_clamped = mag.max(1e-10);
                20.0 * (mag_clamped / reference).log10()
            })
            .collect())
    }

    /// Get frequency bins in Hz (k·sample_rate/n for k = 0..=n/2)
    pub fn frequency_bins_hz(&self) -> Vec<f32> {
        let n = self.config.fft_size as f32;
        (0..self.num_bins())
            .map(|bin| bin as f32 * self.config.sample_rate / n)
            .collect()
    }

    /// Change the FFT size
    ///
    /// Rebuilds the CQT kernels for the new size if a CQT was initialized.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if !is_power_of_two(new_size) {
            return Err(TransformError::InvalidSize(new_size));
        }
        if new_size == self.config.fft_size {
            return Ok(());
        }

        self.engine.initialize_transform(new_size)?;
        self.config.fft_size = new_size;
        self.allocate_buffers();
        debug!("analyzer resized to {} samples", new_size);

        #[cfg(feature = "cqt")]
        {
            if let Some(cqt_config) = self.cqt_config {
                self.init_cqt(cqt_config)?;
            }
        }

        Ok(())
    }

    /// Build CQT kernels for the current FFT size
    #[cfg(feature = "cqt")]
    pub fn init_cqt(&mut self, config: CqtConfig) -> Result<()> {
        if let Err(err) = self.engine.build_kernels(&config, self.config.fft_size) {
            self.cqt_config = None;
            return Err(err);
        }
        self.cqt_config = Some(config);
        Ok(())
    }

    /// Constant-Q transform of a real-valued frame
    ///
    /// Runs the forward FFT, then projects onto the kernel bank.
    ///
    /// # Returns
    /// One complex value per CQT bin
    #[cfg(feature = "cqt")]
    pub fn cqt(&mut self, input_real: &[f32]) -> Result<ComplexSpectrum> {
        let config = self.cqt_config.ok_or(TransformError::KernelsNotBuilt)?;
        self.check_len("input_real", input_real)?;

        self.real.copy_from_slice(input_real);
        self.imag.fill(0.0);
        self.engine.forward_transform(&mut self.real, &mut self.imag)?;

        let mut output = ComplexSpectrum::zeros(config.total_bins());
        self.engine.evaluate_cqt(
            &self.real,
            &self.imag,
            &mut output.real,
            &mut output.imag,
            config.bins_per_octave,
            config.octaves,
        )?;
        Ok(output)
    }

    /// Center frequency of each CQT bin, if a CQT was initialized
    #[cfg(feature = "cqt")]
    pub fn cqt_frequencies(&self) -> Option<Vec<f32>> {
        self.cqt_config.map(|config| config.center_frequencies())
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// FFT size
    pub fn size(&self) -> usize {
        self.config.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.config.fft_size / 2 + 1
    }
}
