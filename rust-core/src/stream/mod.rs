//! Streaming input: sample queue and frame assembly

pub mod buffer;
pub mod frames;

pub use buffer::{SampleConsumer, SampleProducer, SampleRingBuffer};
pub use frames::FrameAssembler;
