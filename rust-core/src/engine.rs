//! Transform context owned by the caller
//!
//! Bundles one set of transform tables with at most one CQT kernel bank.
//! Independent engines share nothing, so each worker can own its own.

#[cfg(feature = "cqt")]
use log::{debug, trace};

#[cfg(feature = "cqt")]
use crate::cqt::{CqtConfig, KernelBank};
use crate::error::Result;
#[cfg(feature = "cqt")]
use crate::error::TransformError;
use crate::transform::{self, TransformState};

/// FFT tables plus the optional CQT kernel bank
#[derive(Debug, Default)]
pub struct SpectralEngine {
    transform: TransformState,

    #[cfg(feature = "cqt")]
    kernels: Option<KernelBank>,
}

impl SpectralEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare transform tables for size `n` (no-op if already sized so)
    pub fn initialize_transform(&mut self, n: usize) -> Result<()> {
        self.transform.initialize(n)
    }

    /// Held transform tables
    pub fn transform_state(&self) -> &TransformState {
        &self.transform
    }

    /// Current transform size, 0 if uninitialized
    pub fn transform_size(&self) -> usize {
        self.transform.size()
    }

    /// Unnormalized forward DFT in place
    pub fn forward_transform(&self, real: &mut [f32], imag: &mut [f32]) -> Result<()> {
        transform::forward(&self.transform, real, imag)
    }

    /// Inverse DFT in place, scaled by 1/n
    pub fn inverse_transform(&self, real: &mut [f32], imag: &mut [f32]) -> Result<()> {
        transform::inverse(&self.transform, real, imag)
    }

    /// Drop the transform tables
    pub fn release_transform(&mut self) {
        self.transform.release();
    }

    /// Build (or reuse) the CQT kernel bank for transform size `n`
    ///
    /// A bank already built for the same `n` and the same total bin count
    /// is kept as is, even if the sample rate or minimum frequency differ.
    /// Any failure after validation clears the held bank.
    #[cfg(feature = "cqt")]
    pub fn build_kernels(&mut self, config: &CqtConfig, n: usize) -> Result<()> {
        config.validate()?;
        if !transform::is_power_of_two(n) {
            return Err(TransformError::InvalidSize(n));
        }

        if let Some(bank) = &self.kernels {
            if bank.size() == n && bank.bins() == config.total_bins() {
                trace!("reusing CQT kernels for n = {}, {} bins", n, bank.bins());
                return Ok(());
            }
        }

        match KernelBank::build(&self.transform, config, n) {
            Ok(bank) => {
                self.kernels = Some(bank);
                Ok(())
            }
            Err(err) => {
                self.kernels = None;
                Err(err)
            }
        }
    }

    /// Currently held kernel bank
    #[cfg(feature = "cqt")]
    pub fn kernels(&self) -> Option<&KernelBank> {
        self.kernels.as_ref()
    }

    /// Project a spectrum onto the first bins_per_octave × octaves kernels
    ///
    /// # Arguments
    /// * `input_real`, `input_imag` - Frequency-domain frame, same size as
    ///   the kernels
    /// * `output_real`, `output_imag` - Exactly bins_per_octave × octaves long
    #[cfg(feature = "cqt")]
    pub fn evaluate_cqt(
        &self,
        input_real: &[f32],
        input_imag: &[f32],
        output_real: &mut [f32],
        output_imag: &mut [f32],
        bins_per_octave: usize,
        octaves: usize,
    ) -> Result<()> {
        if bins_per_octave == 0 || octaves == 0 {
            return Err(TransformError::InvalidParameter {
                name: if bins_per_octave == 0 {
                    "bins_per_octave"
                } else {
                    "octaves"
                },
                reason: "must be positive",
            });
        }

        let bank = self.kernels.as_ref().ok_or(TransformError::KernelsNotBuilt)?;
        let total_bins = bins_per_octave.saturating_mul(octaves);
        if total_bins > bank.bins() {
            return Err(TransformError::BinCountExceeded {
                requested: total_bins,
                available: bank.bins(),
            });
        }
        if output_real.len() != total_bins {
            return Err(TransformError::LengthMismatch {
                name: "output_real",
                expected: total_bins,
                got: output_real.len(),
            });
        }

        bank.evaluate(input_real, input_imag, output_real, output_imag)
    }

    /// Drop the kernel bank
    #[cfg(feature = "cqt")]
    pub fn release_kernels(&mut self) {
        if self.kernels.take().is_some() {
            debug!("released CQT kernels");
        }
    }

    /// No kernel bank exists without the `cqt` feature
    #[cfg(not(feature = "cqt"))]
    pub fn release_kernels(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_transform_lifecycle() {
        let mut engine = SpectralEngine::new();
        assert_eq!(engine.transform_size(), 0);

        engine.initialize_transform(8).unwrap();
        let mut real = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut imag = [0.0; 8];
        engine.forward_transform(&mut real, &mut imag).unwrap();
        assert!(real.iter().all(|&x| (x - 1.0).abs() < 1e-6));

        engine.release_transform();
        assert_eq!(engine.transform_size(), 0);
        assert!(engine.forward_transform(&mut real, &mut imag).is_err());
    }

    #[test]
    fn test_independent_engines() {
        let mut a = SpectralEngine::new();
        let mut b = SpectralEngine::new();
        a.initialize_transform(16).unwrap();
        b.initialize_transform(64).unwrap();

        assert_eq!(a.transform_size(), 16);
        assert_eq!(b.transform_size(), 64);
    }

    #[cfg(feature = "cqt")]
    #[test]
    fn test_kernel_cache_ignores_rate_and_min_freq() {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(1024).unwrap();

        let first = CqtConfig::new(44100.0).with_min_freq(55.0).with_octaves(2);
        engine.build_kernels(&first, 1024).unwrap();

        // Same n, same total bins (24): the stale bank is kept
        let second = CqtConfig::new(8000.0)
            .with_min_freq(100.0)
            .with_bins_per_octave(24)
            .with_octaves(1);
        engine.build_kernels(&second, 1024).unwrap();

        assert_eq!(engine.kernels().unwrap().config(), &first);
    }

    #[cfg(feature = "cqt")]
    #[test]
    fn test_kernel_rebuild_on_bin_count_change() {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(256).unwrap();

        let config = CqtConfig::new(8000.0).with_min_freq(100.0).with_octaves(1);
        engine.build_kernels(&config, 256).unwrap();
        engine.build_kernels(&config.with_octaves(2), 256).unwrap();

        assert_eq!(engine.kernels().unwrap().bins(), 24);
    }

    #[cfg(feature = "cqt")]
    #[test]
    fn test_failed_rebuild_clears_bank() {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(512).unwrap();

        let config = CqtConfig::new(8000.0).with_min_freq(100.0).with_octaves(1);
        engine.build_kernels(&config, 512).unwrap();
        assert!(engine.kernels().is_some());

        // Transform tables are for 512, kernels requested for 1024
        let err = engine.build_kernels(&config, 1024).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Cascading);
        assert!(engine.kernels().is_none());
    }

    #[cfg(feature = "cqt")]
    #[test]
    fn test_invalid_build_keeps_bank() {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(256).unwrap();

        let config = CqtConfig::new(8000.0).with_min_freq(100.0).with_octaves(1);
        engine.build_kernels(&config, 256).unwrap();

        assert!(engine.build_kernels(&config, 300).is_err());
        assert!(engine.build_kernels(&config.with_min_freq(0.0), 256).is_err());
        assert!(engine.kernels().is_some());
    }

    #[cfg(feature = "cqt")]
    #[test]
    fn test_evaluate_requires_kernels() {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(64).unwrap();
        let input = vec![0.0; 64];
        let mut out_re = vec![0.0; 12];
        let mut out_im = vec![0.0; 12];

        assert_eq!(
            engine.evaluate_cqt(&input, &input, &mut out_re, &mut out_im, 12, 1),
            Err(TransformError::KernelsNotBuilt)
        );

        let config = CqtConfig::new(8000.0).with_min_freq(100.0).with_octaves(1);
        engine.build_kernels(&config, 64).unwrap();
        engine
            .evaluate_cqt(&input, &input, &mut out_re, &mut out_im, 12, 1)
            .unwrap();

        engine.release_kernels();
        assert!(engine.kernels().is_none());
        assert!(engine
            .evaluate_cqt(&input, &input, &mut out_re, &mut out_im, 12, 1)
            .is_err());

        // Releasing twice is fine
        engine.release_kernels();
    }
}
