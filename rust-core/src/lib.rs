//! WaveFFT - Radix-2 FFT and Constant-Q Transform Core
//!
//! In-place split-complex FFT with cached twiddle and bit-reversal tables,
//! a constant-Q kernel bank evaluated in the frequency domain, and a flat
//! boolean-result interface for host environments. Optional Python
//! bindings sit behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod boundary;
#[cfg(feature = "cqt")]
pub mod cqt;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod spectrum;
pub mod stream;
pub mod transform;
pub mod windows;

#[cfg(feature = "python")]
pub mod python_bindings;

#[cfg(feature = "cqt")]
pub use cqt::{CqtConfig, KernelBank};
pub use engine::SpectralEngine;
pub use error::{ErrorKind, Result, TransformError};
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer};
pub use windows::WindowType;
