//! Constant-Q transform parameters

use crate::error::{Result, TransformError};

/// Configuration for the Constant-Q kernel bank
///
/// # Example
/// ```
/// use wavefft::cqt::CqtConfig;
///
/// let config = CqtConfig::new(44100.0)
///     .with_min_freq(55.0)
///     .with_bins_per_octave(12)
///     .with_octaves(1);
/// assert_eq!(config.total_bins(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CqtConfig {
    /// Number of bins per octave (12 for semitones)
    pub bins_per_octave: usize,

    /// Number of octaves covered
    pub octaves: usize,

    /// Sample rate in Hz
    pub sample_rate: f32,

    /// Center frequency of bin 0 in Hz
    pub min_freq: f32,
}

impl Default for CqtConfig {
    fn default() -> Self {
        Self {
            bins_per_octave: 12,
            octaves: 7,
            sample_rate: 44100.0,
            min_freq: 32.70, // C1
        }
    }
}

impl CqtConfig {
    /// Default layout at the given sample rate
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_bins_per_octave(mut self, bins_per_octave: usize) -> Self {
        self.bins_per_octave = bins_per_octave;
        self
    }

    pub fn with_octaves(mut self, octaves: usize) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_min_freq(mut self, min_freq: f32) -> Self {
        self.min_freq = min_freq;
        self
    }

    /// Reject non-positive parameters
    pub fn validate(&self) -> Result<()> {
        if self.bins_per_octave == 0 {
            return Err(TransformError::InvalidParameter {
                name: "bins_per_octave",
                reason: "must be positive",
            });
        }
        if self.octaves == 0 {
            return Err(TransformError::InvalidParameter {
                name: "octaves",
                reason: "must be positive",
            });
        }
        // Written as negations so NaN is rejected too
        if !(self.sample_rate > 0.0) {
            return Err(TransformError::InvalidParameter {
                name: "sample_rate",
                reason: "must be positive",
            });
        }
        if !(self.min_freq > 0.0) {
            return Err(TransformError::InvalidParameter {
                name: "min_freq",
                reason: "must be positive",
            });
        }
        self.checked_total_bins().map(|_| ())
    }

    /// bins_per_octave × octaves
    pub fn total_bins(&self) -> usize {
        self.bins_per_octave.saturating_mul(self.octaves)
    }

    pub(crate) fn checked_total_bins(&self) -> Result<usize> {
        self.bins_per_octave
            .checked_mul(self.octaves)
            .ok_or(TransformError::InvalidParameter {
                name: "octaves",
                reason: "total bin count overflows",
            })
    }

    /// Q = 1 / (2^(1/bins_per_octave) - 1)
    pub fn quality_factor(&self) -> f32 {
        1.0 / (2.0f32.powf(1.0 / self.bins_per_octave as f32) - 1.0)
    }

    /// minFreq × 2^(bin/bins_per_octave)
    pub fn center_frequency(&self, bin: usize) -> f32 {
        self.min_freq * 2.0f32.powf(bin as f32 / self.bins_per_octave as f32)
    }

    /// Center frequency of every bin
    pub fn center_frequencies(&self) -> Vec<f32> {
        (0..self.total_bins())
            .map(|bin| self.center_frequency(bin))
            .collect()
    }

    pub fn nyquist(&self) -> f32 {
        self.sample_rate / 2.0
    }
}
