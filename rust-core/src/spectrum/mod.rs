//! Spectral analysis with FFT

pub mod analysis;
pub mod stft;
pub mod windowing;

pub use analysis::{AnalyzerConfig, ComplexSpectrum, SpectrumAnalyzer};
pub use stft::{Spectrogram, StftOptions};
