//! Precomputed tables for a single power-of-two transform size
//!
//! Holds the twiddle table and bit-reversal permutation. Tables are only
//! rebuilt when the requested size changes.

use log::{debug, trace};
use num_complex::Complex32;
use std::f64::consts::PI;

use crate::error::{try_zeroed, Result, TransformError};

/// Check whether `n` is a valid transform size
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Twiddle table and bit-reversal permutation for the current size
///
/// A size of 0 means "uninitialized"; in that state both tables are empty.
#[derive(Debug, Clone, Default)]
pub struct TransformState {
    /// Current transform size (0 when uninitialized)
    size: usize,

    /// twiddles[i] = exp(-2πi·i/n) for i in 0..n/2
    twiddles: Vec<Complex32>,

    /// bit_reversal[i] = i with its log2(n) bits reversed
    bit_reversal: Vec<usize>,
}

impl TransformState {
    /// Create an uninitialized state
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare tables for size `n`
    ///
    /// Rejects non-powers-of-two without touching held tables. Repeating
    /// the current size is a no-op. On allocation failure the state is left
    /// fully cleared.
    pub fn initialize(&mut self, n: usize) -> Result<()> {
        if !is_power_of_two(n) {
            return Err(TransformError::InvalidSize(n));
        }

        if self.size == n && self.bit_reversal.len() == n {
            trace!("transform tables for n = {} already present", n);
            return Ok(());
        }

        self.release();

        let twiddles = compute_twiddles(n)?;
        let bit_reversal = compute_bit_reversal(n)?;

        self.twiddles = twiddles;
        self.bit_reversal = bit_reversal;
        self.size = n;

        debug!("initialized transform tables for n = {}", n);
        Ok(())
    }

    /// Drop held tables and return to the uninitialized state
    pub fn release(&mut self) {
        if self.size != 0 {
            trace!("releasing transform tables for n = {}", self.size);
        }
        self.twiddles = Vec::new();
        self.bit_reversal = Vec::new();
        self.size = 0;
    }

    /// Current transform size, 0 if uninitialized
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_initialized(&self) -> bool {
        self.size != 0
    }

    /// Twiddle factors, n/2 entries
    pub fn twiddles(&self) -> &[Complex32] {
        &self.twiddles
    }

    /// Bit-reversal permutation, n entries
    pub fn bit_reversal(&self) -> &[usize] {
        &self.bit_reversal
    }
}

fn compute_twiddles(n: usize) -> Result<Vec<Complex32>> {
    let mut twiddles: Vec<Complex32> = try_zeroed(n / 2)?;
    for (i, w) in twiddles.iter_mut().enumerate() {
        let angle = -2.0 * PI * i as f64 / n as f64;
        *w = Complex32::new(angle.cos() as f32, angle.sin() as f32);
    }
    Ok(twiddles)
}

/// Reversed-carry counter: j walks 0..n in bit-reversed order
fn compute_bit_reversal(n: usize) -> Result<Vec<usize>> {
    let mut indices: Vec<usize> = try_zeroed(n)?;
    let mut j = 0usize;
    for entry in indices.iter_mut() {
        *entry = j;
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(2));
        assert!(is_power_of_two(1024));
        assert!(!is_power_of_two(3));
        assert!(!is_power_of_two(1000));
    }

    #[test]
    fn test_bit_reversal_n8() {
        let mut state = TransformState::new();
        state.initialize(8).unwrap();

        assert_eq!(state.bit_reversal(), &[0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_twiddles_n4() {
        let mut state = TransformState::new();
        state.initialize(4).unwrap();

        let twiddles = state.twiddles();
        assert_eq!(twiddles.len(), 2);
        assert!((twiddles[0].re - 1.0).abs() < 1e-7);
        assert!(twiddles[0].im.abs() < 1e-7);
        // exp(-iπ/2) = -i
        assert!(twiddles[1].re.abs() < 1e-7);
        assert!((twiddles[1].im + 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_size_one() {
        let mut state = TransformState::new();
        state.initialize(1).unwrap();

        assert_eq!(state.size(), 1);
        assert!(state.twiddles().is_empty());
        assert_eq!(state.bit_reversal(), &[0]);
    }

    #[test]
    fn test_invalid_size_keeps_state() {
        let mut state = TransformState::new();
        state.initialize(16).unwrap();

        assert_eq!(state.initialize(12), Err(TransformError::InvalidSize(12)));
        assert_eq!(state.initialize(0), Err(TransformError::InvalidSize(0)));
        assert_eq!(state.size(), 16);
        assert_eq!(state.twiddles().len(), 8);
        assert_eq!(state.bit_reversal().len(), 16);
    }

    #[test]
    fn test_reinitialize_same_size_reuses_tables() {
        let mut state = TransformState::new();
        state.initialize(64).unwrap();
        let twiddle_ptr = state.twiddles().as_ptr();
        let reversal_ptr = state.bit_reversal().as_ptr();
        let before = state.twiddles().to_vec();

        state.initialize(64).unwrap();

        assert_eq!(state.twiddles().as_ptr(), twiddle_ptr);
        assert_eq!(state.bit_reversal().as_ptr(), reversal_ptr);
        assert_eq!(state.twiddles(), &before[..]);
    }

    #[test]
    fn test_resize_replaces_tables() {
        let mut state = TransformState::new();
        state.initialize(8).unwrap();
        state.initialize(32).unwrap();

        assert_eq!(state.size(), 32);
        assert_eq!(state.twiddles().len(), 16);
        assert_eq!(state.bit_reversal().len(), 32);
    }

    #[test]
    fn test_release() {
        let mut state = TransformState::new();
        state.initialize(8).unwrap();
        state.release();

        assert!(!state.is_initialized());
        assert!(state.twiddles().is_empty());
        assert!(state.bit_reversal().is_empty());

        // Releasing an empty state is fine
        state.release();
        assert_eq!(state.size(), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure_clears_state() {
        let mut state = TransformState::new();
        state.initialize(16).unwrap();

        let huge = 1usize << 62;
        assert_eq!(
            state.initialize(huge),
            Err(TransformError::Allocation(huge / 2))
        );
        assert_eq!(state.size(), 0);
        assert!(state.twiddles().is_empty());
        assert!(state.bit_reversal().is_empty());
    }
}
