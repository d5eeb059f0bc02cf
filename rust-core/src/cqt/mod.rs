//! Constant-Q transform on top of the radix-2 FFT
//!
//! Kernels are built once per (size, bin count) and evaluated against
//! frequency-domain frames.

pub mod config;
pub mod evaluate;
pub mod kernel;

pub use config::CqtConfig;
pub use kernel::KernelBank;
