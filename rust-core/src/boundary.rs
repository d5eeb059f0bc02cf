//! Flat numeric interface: sizes and buffers in, success flag out
//!
//! Mirrors the call table a host environment drives. Buffers that a host
//! may pass as null are `Option`s, sizes are `i32`. Every rejection is
//! logged at debug level and reported as `false`; nothing else leaks out.

use log::debug;

use crate::engine::SpectralEngine;
use crate::error::{Result, TransformError};

fn report(operation: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!("{} rejected ({:?}): {}", operation, err.kind(), err);
            false
        }
    }
}

fn positive(name: &'static str, value: i32) -> Result<usize> {
    if value <= 0 {
        return Err(TransformError::InvalidParameter {
            name,
            reason: "must be positive",
        });
    }
    Ok(value as usize)
}

/// First `len` elements of a host buffer that must be present
fn prefix<'a>(name: &'static str, buffer: Option<&'a [f32]>, len: usize) -> Result<&'a [f32]> {
    let buffer = buffer.ok_or(TransformError::MissingBuffer(name))?;
    buffer.get(..len).ok_or(TransformError::LengthMismatch {
        name,
        expected: len,
        got: buffer.len(),
    })
}

fn prefix_mut<'a>(
    name: &'static str,
    buffer: Option<&'a mut [f32]>,
    len: usize,
) -> Result<&'a mut [f32]> {
    let buffer = buffer.ok_or(TransformError::MissingBuffer(name))?;
    let got = buffer.len();
    buffer.get_mut(..len).ok_or(TransformError::LengthMismatch {
        name,
        expected: len,
        got,
    })
}

/// Prepare transform tables for size `n`
pub fn initialize_transform(engine: &mut SpectralEngine, n: i32) -> bool {
    report(
        "initialize_transform",
        positive("n", n).and_then(|n| engine.initialize_transform(n)),
    )
}

/// Forward FFT of `real[..n]` / `imag[..n]` in place
pub fn forward_transform(
    engine: &SpectralEngine,
    real: Option<&mut [f32]>,
    imag: Option<&mut [f32]>,
    n: i32,
) -> bool {
    let result = (|| {
        let n = positive("n", n)?;
        let real = prefix_mut("real", real, n)?;
        let imag = prefix_mut("imag", imag, n)?;
        engine.forward_transform(real, imag)
    })();
    report("forward_transform", result)
}

/// Inverse FFT of `real[..n]` / `imag[..n]` in place
pub fn inverse_transform(
    engine: &SpectralEngine,
    real: Option<&mut [f32]>,
    imag: Option<&mut [f32]>,
    n: i32,
) -> bool {
    let result = (|| {
        let n = positive("n", n)?;
        let real = prefix_mut("real", real, n)?;
        let imag = prefix_mut("imag", imag, n)?;
        engine.inverse_transform(real, imag)
    })();
    report("inverse_transform", result)
}

/// Build the CQT kernel bank (reused when n and the bin count are unchanged)
#[cfg(feature = "cqt")]
pub fn build_kernels(
    engine: &mut SpectralEngine,
    bins_per_octave: i32,
    octaves: i32,
    n: i32,
    sample_rate: f32,
    min_freq: f32,
) -> bool {
    let result = (|| {
        let config = crate::cqt::CqtConfig {
            bins_per_octave: positive("bins_per_octave", bins_per_octave)?,
            octaves: positive("octaves", octaves)?,
            sample_rate,
            min_freq,
        };
        let n = positive("n", n)?;
        engine.build_kernels(&config, n)
    })();
    report("build_kernels", result)
}

/// Project a frequency-domain frame onto bins_per_octave × octaves kernels
#[allow(clippy::too_many_arguments)]
#[cfg(feature = "cqt")]
pub fn evaluate_cqt(
    engine: &SpectralEngine,
    input_real: Option<&[f32]>,
    input_imag: Option<&[f32]>,
    output_real: Option<&mut [f32]>,
    output_imag: Option<&mut [f32]>,
    n: i32,
    bins_per_octave: i32,
    octaves: i32,
) -> bool {
    let result = (|| {
        let n = positive("n", n)?;
        let bins_per_octave = positive("bins_per_octave", bins_per_octave)?;
        let octaves = positive("octaves", octaves)?;
        let total_bins = bins_per_octave.saturating_mul(octaves);

        let input_real = prefix("input_real", input_real, n)?;
        let input_imag = prefix("input_imag", input_imag, n)?;
        let output_real = prefix_mut("output_real", output_real, total_bins)?;
        let output_imag = prefix_mut("output_imag", output_imag, total_bins)?;

        engine.evaluate_cqt(
            input_real,
            input_imag,
            output_real,
            output_imag,
            bins_per_octave,
            octaves,
        )
    })();
    report("evaluate_cqt", result)
}

/// Drop transform tables; always succeeds
pub fn release_transform(engine: &mut SpectralEngine) -> bool {
    engine.release_transform();
    true
}

/// Drop the kernel bank; always succeeds
pub fn release_kernels(engine: &mut SpectralEngine) -> bool {
    engine.release_kernels();
    true
}
