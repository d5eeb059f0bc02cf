//! Overlapping frame assembly from a sample stream

use crate::error::{try_zeroed, Result, TransformError};

use super::buffer::SampleConsumer;

/// Pulls samples from a [`SampleConsumer`] and yields frames of
/// `frame_size` samples whose starts are `hop_size` apart
pub struct FrameAssembler {
    consumer: SampleConsumer,
    frame: Vec<f32>,
    filled: usize,
    hop_size: usize,

    /// Last call returned a frame; slide before refilling
    emitted: bool,
}

impl FrameAssembler {
    /// # Arguments
    /// * `consumer` - Reading end of the sample queue
    /// * `frame_size` - Samples per frame
    /// * `hop_size` - Advance between frames, `0 < hop_size <= frame_size`
    pub fn new(consumer: SampleConsumer, frame_size: usize, hop_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(TransformError::InvalidParameter {
                name: "frame_size",
                reason: "must be positive",
            });
        }
        if hop_size == 0 || hop_size > frame_size {
            return Err(TransformError::InvalidParameter {
                name: "hop_size",
                reason: "must be in 1..=frame_size",
            });
        }

        Ok(Self {
            consumer,
            frame: try_zeroed(frame_size)?,
            filled: 0,
            hop_size,
            emitted: false,
        })
    }

    /// Next complete frame, or `None` until enough samples have arrived
    pub fn next_frame(&mut self) -> Option<&[f32]> {
        if self.emitted {
            self.frame.copy_within(self.hop_size.., 0);
            self.filled -= self.hop_size;
            self.emitted = false;
        }

        self.filled += self.consumer.read(&mut self.frame[self.filled..]);
        if self.filled < self.frame.len() {
            return None;
        }

        self.emitted = true;
        Some(&self.frame)
    }

    pub fn frame_size(&self) -> usize {
        self.frame.len()
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Samples buffered toward the next frame
    pub fn pending(&self) -> usize {
        self.filled + self.consumer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SampleRingBuffer;

    #[test]
    fn test_frames_overlap() {
        let (mut producer, consumer) = SampleRingBuffer::new(64).split();
        let mut assembler = FrameAssembler::new(consumer, 4, 2).unwrap();

        producer.write(&[0.0, 1.0, 2.0]);
        assert!(assembler.next_frame().is_none());

        producer.write(&[3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(assembler.next_frame().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(assembler.next_frame().unwrap(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(assembler.next_frame().unwrap(), &[4.0, 5.0, 6.0, 7.0]);
        assert!(assembler.next_frame().is_none());
        assert_eq!(assembler.pending(), 2);
    }

    #[test]
    fn test_frames_without_overlap() {
        let (mut producer, consumer) = SampleRingBuffer::new(64).split();
        let mut assembler = FrameAssembler::new(consumer, 3, 3).unwrap();

        producer.write(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(assembler.next_frame().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(assembler.next_frame().unwrap(), &[4.0, 5.0, 6.0]);
        assert!(assembler.next_frame().is_none());
    }

    #[test]
    fn test_invalid_hop() {
        let (_, consumer) = SampleRingBuffer::new(8).split();
        assert!(FrameAssembler::new(consumer, 4, 5).is_err());

        let (_, consumer) = SampleRingBuffer::new(8).split();
        assert!(FrameAssembler::new(consumer, 4, 0).is_err());

        let (_, consumer) = SampleRingBuffer::new(8).split();
        assert!(FrameAssembler::new(consumer, 0, 0).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_frame_reports_allocation() {
        let (_, consumer) = SampleRingBuffer::new(8).split();
        let frame_size = usize::MAX / 2;
        assert!(matches!(
            FrameAssembler::new(consumer, frame_size, 1),
            Err(TransformError::Allocation(size)) if size == frame_size
        ));
    }
}
