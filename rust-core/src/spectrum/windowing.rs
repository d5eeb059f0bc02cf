//! Windowing helpers for spectral analysis
//!
//! Applies precomputed windows to time-domain frames before the FFT to
//! reduce spectral leakage, and computes the matching amplitude corrections.

use crate::windows::{generate_window, WindowType};

/// Apply a precomputed window in-place
pub fn apply_window_inplace(signal: &mut [f32], window: &[f32]) {
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Calculate window correction factor
///
/// Windowing reduces the amplitude of a tone; multiplying the magnitude
/// spectrum by `length / Σw` restores it. Windows that sum to zero (Hann
/// of length 2) get no correction.
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f32 {
    let window = generate_window(window_type, length);
    let sum: f32 = window.iter().sum();
    if sum <= f32::EPSILON {
        return 1.0;
    }
    length as f32 / sum
}
