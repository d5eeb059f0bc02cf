//! Python bindings for the transform engine

use num_complex::Complex32;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2, ToPyArray};
use pyo3::prelude::*;

use super::window_bindings::PyWindowType;
use crate::cqt::CqtConfig;
use crate::spectrum::{AnalyzerConfig, ComplexSpectrum, Spectrogram, SpectrumAnalyzer, StftOptions};

type SplitArrays<'py> = (&'py PyArray1<f32>, &'py PyArray1<f32>);

fn split_arrays(py: Python<'_>, spectrum: ComplexSpectrum) -> SplitArrays<'_> {
    (
        PyArray1::from_vec(py, spectrum.real),
        PyArray1::from_vec(py, spectrum.imag),
    )
}

fn stft_options(hop_size: Option<usize>, window_type: PyWindowType) -> StftOptions {
    StftOptions {
        hop_size,
        window_type: window_type.into(),
    }
}

/// STFT result exposed to Python
#[pyclass(name = "Spectrogram")]
pub struct PySpectrogram {
    inner: Spectrogram,
}

#[pymethods]
impl PySpectrogram {
    /// Magnitudes, shape (time_bins, freq_bins)
    #[getter]
    fn magnitudes<'py>(&self, py: Python<'py>) -> &'py PyArray2<f32> {
        self.inner.magnitudes.to_pyarray(py)
    }

    /// Complex spectra, shape (time_bins, fft_size)
    #[getter]
    fn frames<'py>(&self, py: Python<'py>) -> &'py PyArray2<Complex32> {
        self.inner.frames.to_pyarray(py)
    }

    #[getter]
    fn fft_size(&self) -> usize {
        self.inner.fft_size
    }

    #[getter]
    fn hop_size(&self) -> usize {
        self.inner.hop_size
    }

    #[getter]
    fn freq_bins(&self) -> usize {
        self.inner.freq_bins
    }

    #[getter]
    fn time_bins(&self) -> usize {
        self.inner.time_bins
    }

    #[getter]
    fn max_magnitude(&self) -> f32 {
        self.inner.max_magnitude
    }
}

/// FFT / CQT engine exposed to Python
#[pyclass(name = "WaveFFT")]
pub struct PyWaveFft {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PyWaveFft {
    /// Create a new transform engine
    ///
    /// Args:
    ///     size: FFT size (power of 2)
    ///     sample_rate: Sample rate in Hz
    ///     window_type: Window used by `analyze`
    #[new]
    #[pyo3(signature = (size=2048, sample_rate=44100.0, window_type=PyWindowType::Hann))]
    fn new(size: usize, sample_rate: f32, window_type: PyWindowType) -> PyResult<Self> {
        let config = AnalyzerConfig {
            fft_size: size,
            window_type: window_type.into(),
            sample_rate,
            ..AnalyzerConfig::default()
        };

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(config)?,
        })
    }

    /// Check if a size is a power of two
    #[staticmethod]
    fn is_valid_size(size: usize) -> bool {
        SpectrumAnalyzer::is_valid_size(size)
    }

    /// Current FFT size
    #[getter]
    fn size(&self) -> usize {
        self.analyzer.size()
    }

    /// Forward FFT of a real signal
    ///
    /// Returns:
    ///     (real, imag) numpy arrays
    fn fft<'py>(&mut self, py: Python<'py>, input: PyReadonlyArray1<f32>) -> PyResult<SplitArrays<'py>> {
        let spectrum = self.analyzer.fft(input.as_slice()?)?;
        Ok(split_arrays(py, spectrum))
    }

    /// Forward FFT of a complex signal given as real and imaginary parts
    fn fft_complex<'py>(
        &mut self,
        py: Python<'py>,
        real: PyReadonlyArray1<f32>,
        imag: PyReadonlyArray1<f32>,
    ) -> PyResult<SplitArrays<'py>> {
        let spectrum = self.analyzer.fft_complex(real.as_slice()?, imag.as_slice()?)?;
        Ok(split_arrays(py, spectrum))
    }

    /// Inverse FFT, scaled by 1/n
    fn ifft<'py>(
        &mut self,
        py: Python<'py>,
        real: PyReadonlyArray1<f32>,
        imag: PyReadonlyArray1<f32>,
    ) -> PyResult<SplitArrays<'py>> {
        let signal = self.analyzer.ifft(real.as_slice()?, imag.as_slice()?)?;
        Ok(split_arrays(py, signal))
    }

    /// Magnitudes of bins 0..=n/2 of a full spectrum
    fn magnitude_spectrum<'py>(
        &self,
        py: Python<'py>,
        real: PyReadonlyArray1<f32>,
        imag: PyReadonlyArray1<f32>,
    ) -> PyResult<&'py PyArray1<f32>> {
        let spectrum = ComplexSpectrum {
            real: real.as_slice()?.to_vec(),
            imag: imag.as_slice()?.to_vec(),
        };
        let magnitudes = self.analyzer.magnitude_spectrum(&spectrum)?;
        Ok(PyArray1::from_vec(py, magnitudes))
    }

    /// Windowed magnitude spectrum, bins 0..=n/2
    fn analyze<'py>(&mut self, py: Python<'py>, signal: PyReadonlyArray1<f32>) -> PyResult<&'py PyArray1<f32>> {
        let spectrum = self.analyzer.analyze(signal.as_slice()?)?;
        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Windowed magnitude spectrum in dB
    #[pyo3(signature = (signal, reference=1.0))]
    fn analyze_db<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f32>,
        reference: f32,
    ) -> PyResult<&'py PyArray1<f32>> {
        let spectrum = self.analyzer.analyze_db(signal.as_slice()?, reference)?;
        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Get frequency bins in Hz
    fn frequency_bins_hz<'py>(&self, py: Python<'py>) -> &'py PyArray1<f32> {
        PyArray1::from_vec(py, self.analyzer.frequency_bins_hz())
    }

    /// Change the FFT size, rebuilding CQT kernels if configured
    fn resize(&mut self, size: usize) -> PyResult<()> {
        Ok(self.analyzer.resize(size)?)
    }

    /// Build constant-Q kernels for the current size
    ///
    /// Args:
    ///     bins_per_octave: Bins per octave
    ///     octaves: Number of octaves
    ///     min_freq: Center frequency of bin 0 in Hz
    ///     sample_rate: Defaults to the engine's sample rate
    #[pyo3(signature = (bins_per_octave=12, octaves=7, min_freq=32.70, sample_rate=None))]
    fn init_cqt(
        &mut self,
        bins_per_octave: usize,
        octaves: usize,
        min_freq: f32,
        sample_rate: Option<f32>,
    ) -> PyResult<()> {
        let sample_rate = sample_rate.unwrap_or(self.analyzer.config().sample_rate);
        let config = CqtConfig::new(sample_rate)
            .with_bins_per_octave(bins_per_octave)
            .with_octaves(octaves)
            .with_min_freq(min_freq);
        Ok(self.analyzer.init_cqt(config)?)
    }

    /// Constant-Q transform of a real signal
    ///
    /// Returns:
    ///     (real, imag) numpy arrays, one entry per CQT bin
    fn cqt<'py>(&mut self, py: Python<'py>, input: PyReadonlyArray1<f32>) -> PyResult<SplitArrays<'py>> {
        let output = self.analyzer.cqt(input.as_slice()?)?;
        Ok(split_arrays(py, output))
    }

    /// Center frequencies of the CQT bins, or None before `init_cqt`
    fn cqt_frequencies<'py>(&self, py: Python<'py>) -> Option<&'py PyArray1<f32>> {
        self.analyzer
            .cqt_frequencies()
            .map(|freqs| PyArray1::from_vec(py, freqs))
    }

    /// Short-time Fourier transform
    #[pyo3(signature = (samples, hop_size=None, window_type=PyWindowType::Hann))]
    fn stft(
        &mut self,
        samples: PyReadonlyArray1<f32>,
        hop_size: Option<usize>,
        window_type: PyWindowType,
    ) -> PyResult<PySpectrogram> {
        let options = stft_options(hop_size, window_type);
        let inner = self.analyzer.stft(samples.as_slice()?, &options)?;
        Ok(PySpectrogram { inner })
    }

    /// Inverse STFT by overlap-add
    ///
    /// Args:
    ///     frames: complex64 array, shape (frames, size)
    #[pyo3(signature = (frames, hop_size=None, window_type=PyWindowType::Hann))]
    fn istft<'py>(
        &mut self,
        py: Python<'py>,
        frames: PyReadonlyArray2<Complex32>,
        hop_size: Option<usize>,
        window_type: PyWindowType,
    ) -> PyResult<&'py PyArray1<f32>> {
        let options = stft_options(hop_size, window_type);
        let signal = self.analyzer.istft(frames.as_array(), &options)?;
        Ok(PyArray1::from_vec(py, signal))
    }
}
