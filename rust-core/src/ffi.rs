//! C-compatible exports of the flat interface
//!
//! Every function takes an engine handle created by [`wavefft_engine_new`]
//! and returns `false` on any failure, including null pointers and panics.
//!
//! # Symbol prefix
//!
//! All exported symbols use the `wavefft_` prefix.
//!
//! # Thread safety
//!
//! **NOT thread-safe.** Calls on the same handle must be serialized by the
//! caller. Separate handles are independent.

use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;

use crate::boundary;
use crate::engine::SpectralEngine;

/// Run an export body, turning a panic into `false`
fn guard(body: impl FnOnce() -> bool) -> bool {
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or(false)
}

/// Borrow `len` floats at `ptr`, or `None` for null / non-positive length
///
/// # Safety
/// A non-null `ptr` must point to at least `len` initialized floats that
/// stay valid and unaliased for `'a`.
unsafe fn buffer_mut<'a>(ptr: *mut f32, len: i32) -> Option<&'a mut [f32]> {
    if ptr.is_null() || len <= 0 {
        return None;
    }
    Some(slice::from_raw_parts_mut(ptr, len as usize))
}

#[cfg(feature = "cqt")]
unsafe fn buffer<'a>(ptr: *const f32, len: i32) -> Option<&'a [f32]> {
    if ptr.is_null() || len <= 0 {
        return None;
    }
    Some(slice::from_raw_parts(ptr, len as usize))
}

/// Creates a new engine with no tables allocated.
///
/// Returns `NULL` on internal error. The caller owns the handle and must
/// free it with [`wavefft_engine_free`].
#[no_mangle]
pub extern "C" fn wavefft_engine_new() -> *mut SpectralEngine {
    panic::catch_unwind(|| Box::into_raw(Box::new(SpectralEngine::new())))
        .unwrap_or(ptr::null_mut())
}

/// Destroys an engine and all tables it holds.
///
/// Passing `NULL` is a safe no-op.
///
/// # Safety
/// `engine` must come from [`wavefft_engine_new`] and not be used again.
#[no_mangle]
pub unsafe extern "C" fn wavefft_engine_free(engine: *mut SpectralEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Prepare transform tables for a power-of-two size `n`.
///
/// # Safety
/// `engine` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn wavefft_init_fft(engine: *mut SpectralEngine, n: i32) -> bool {
    guard(|| match engine.as_mut() {
        Some(engine) => boundary::initialize_transform(engine, n),
        None => false,
    })
}

/// In-place forward FFT of `n` samples.
///
/// # Safety
/// `engine` must be null or a live handle; non-null `real` and `imag` must
/// each point to `n` floats and must not overlap.
#[no_mangle]
pub unsafe extern "C" fn wavefft_fft(
    engine: *mut SpectralEngine,
    real: *mut f32,
    imag: *mut f32,
    n: i32,
) -> bool {
    guard(|| match engine.as_ref() {
        Some(engine) => {
            boundary::forward_transform(engine, buffer_mut(real, n), buffer_mut(imag, n), n)
        }
        None => false,
    })
}

/// In-place inverse FFT of `n` samples, scaled by 1/n.
///
/// # Safety
/// Same requirements as [`wavefft_fft`].
#[no_mangle]
pub unsafe extern "C" fn wavefft_ifft(
    engine: *mut SpectralEngine,
    real: *mut f32,
    imag: *mut f32,
    n: i32,
) -> bool {
    guard(|| match engine.as_ref() {
        Some(engine) => {
            boundary::inverse_transform(engine, buffer_mut(real, n), buffer_mut(imag, n), n)
        }
        None => false,
    })
}

/// Build the CQT kernel bank for transform size `n`.
///
/// # Safety
/// `engine` must be null or a live handle.
#[cfg(feature = "cqt")]
#[no_mangle]
pub unsafe extern "C" fn wavefft_init_cqt(
    engine: *mut SpectralEngine,
    bins_per_octave: i32,
    octaves: i32,
    n: i32,
    sample_rate: f32,
    min_freq: f32,
) -> bool {
    guard(|| match engine.as_mut() {
        Some(engine) => {
            boundary::build_kernels(engine, bins_per_octave, octaves, n, sample_rate, min_freq)
        }
        None => false,
    })
}

/// Evaluate `bins_per_octave * octaves` CQT bins of a spectrum.
///
/// # Safety
/// `engine` must be null or a live handle; non-null inputs must point to
/// `n` floats and non-null outputs to `bins_per_octave * octaves` floats.
/// Outputs must not overlap each other or the inputs.
#[cfg(feature = "cqt")]
#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub unsafe extern "C" fn wavefft_cqt(
    engine: *mut SpectralEngine,
    input_real: *const f32,
    input_imag: *const f32,
    output_real: *mut f32,
    output_imag: *mut f32,
    n: i32,
    bins_per_octave: i32,
    octaves: i32,
) -> bool {
    guard(|| {
        let Some(engine) = engine.as_ref() else {
            return false;
        };
        let total_bins = match bins_per_octave.checked_mul(octaves) {
            Some(total) if total > 0 => total,
            _ => return false,
        };
        boundary::evaluate_cqt(
            engine,
            buffer(input_real, n),
            buffer(input_imag, n),
            buffer_mut(output_real, total_bins),
            buffer_mut(output_imag, total_bins),
            n,
            bins_per_octave,
            octaves,
        )
    })
}

/// Release transform tables. Always returns `true` for a live handle.
///
/// # Safety
/// `engine` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn wavefft_free_fft(engine: *mut SpectralEngine) -> bool {
    guard(|| match engine.as_mut() {
        Some(engine) => boundary::release_transform(engine),
        None => false,
    })
}

/// Release the CQT kernel bank. Always returns `true` for a live handle,
/// also when the `cqt` feature is compiled out.
///
/// # Safety
/// `engine` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn wavefft_free_cqt(engine: *mut SpectralEngine) -> bool {
    guard(|| match engine.as_mut() {
        Some(engine) => boundary::release_kernels(engine),
        None => false,
    })
}
