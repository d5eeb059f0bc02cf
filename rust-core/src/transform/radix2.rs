//! In-place iterative radix-2 Cooley–Tukey transform on split buffers
//!
//! Operates on separate real and imaginary slices so callers can hand in
//! flat `f32` buffers directly. The forward transform is unnormalized; the
//! inverse is scaled by 1/n and reuses the forward code path.

use super::state::{is_power_of_two, TransformState};
use crate::error::{Result, TransformError};

/// Check the buffers against the held tables before anything is mutated
fn check_buffers(state: &TransformState, real: &[f32], imag: &[f32]) -> Result<()> {
    let n = real.len();
    if !is_power_of_two(n) {
        return Err(TransformError::InvalidSize(n));
    }
    if imag.len() != n {
        return Err(TransformError::LengthMismatch {
            name: "imag",
            expected: n,
            got: imag.len(),
        });
    }
    if !state.is_initialized() {
        return Err(TransformError::NotInitialized);
    }
    if state.size() != n {
        return Err(TransformError::SizeMismatch {
            initialized: state.size(),
            requested: n,
        });
    }
    Ok(())
}

/// Forward DFT, in place, without scaling
///
/// # Arguments
/// * `state` - Tables initialized for exactly `real.len()`
/// * `real` - Real parts, overwritten with the spectrum's real parts
/// * `imag` - Imaginary parts, overwritten likewise
pub fn forward(state: &TransformState, real: &mut [f32], imag: &mut [f32]) -> Result<()> {
    check_buffers(state, real, imag)?;
    butterflies(state, real, imag);
    Ok(())
}

/// Inverse DFT, in place, scaled by 1/n
///
/// Conjugates the input, runs the forward transform, then conjugates and
/// scales the result.
pub fn inverse(state: &TransformState, real: &mut [f32], imag: &mut [f32]) -> Result<()> {
    check_buffers(state, real, imag)?;

    for im in imag.iter_mut() {
        *im = -*im;
    }

    butterflies(state, real, imag);

    let inv_n = 1.0 / real.len() as f32;
    for re in real.iter_mut() {
        *re *= inv_n;
    }
    for im in imag.iter_mut() {
        *im *= -inv_n;
    }
    Ok(())
}

/// Bit-reversal reorder followed by decimation-in-time butterfly passes
fn butterflies(state: &TransformState, real: &mut [f32], imag: &mut [f32]) {
    let n = real.len();

    // Each pair is swapped once, from its lower index
    for (i, &j) in state.bit_reversal().iter().enumerate() {
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }
    }

    let twiddles = state.twiddles();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = n / len;

        for start in (0..n).step_by(len) {
            for j in 0..half {
                let w = twiddles[j * step];
                let even = start + j;
                let odd = even + half;

                let re = real[odd] * w.re - imag[odd] * w.im;
                let im = real[odd] * w.im + imag[odd] * w.re;

                real[odd] = real[even] - re;
                imag[odd] = imag[even] - im;
                real[even] += re;
                imag[even] += im;
            }
        }

        len <<= 1;
    }
}
