//! Window functions for spectral analysis and CQT kernel design

use std::f32::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~31 dB, used for CQT kernels
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    /// Sidelobe attenuation: ~58 dB
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// Single window coefficient w[index] for a window of `length` samples
///
/// A window of length 1 is the single coefficient 1.0.
#[inline]
pub fn window_coefficient(window_type: WindowType, index: usize, length: usize) -> f32 {
    if length <= 1 {
        return 1.0;
    }

    let angle = 2.0 * PI * index as f32 / (length as f32 - 1.0);
    match window_type {
        WindowType::Hann => 0.5 - 0.5 * angle.cos(),
        WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
        WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
        WindowType::Rectangular => 1.0,
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f32> {
    (0..length)
        .map(|n| window_coefficient(window_type, n, length))
        .collect()
}
