//! Radix-2 FFT: table state plus the forward/inverse passes

pub mod radix2;
pub mod state;

pub use radix2::{forward, inverse};
pub use state::{is_power_of_two, TransformState};
