//! Lock-free sample ring buffer
//!
//! Single-producer single-consumer queue for handing samples from a
//! capture thread to the analysis thread.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Ring buffer of `f32` samples, split before use
pub struct SampleRingBuffer {
    rb: HeapRb<f32>,
}

impl SampleRingBuffer {
    /// Create new ring buffer
    ///
    /// # Arguments
    /// * `capacity` - Buffer capacity in samples
    pub fn new(capacity: usize) -> Self {
        Self {
            rb: HeapRb::new(capacity),
        }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (SampleProducer, SampleConsumer) {
        let (producer, consumer) = self.rb.split();
        (SampleProducer { producer }, SampleConsumer { consumer })
    }
}

/// Writing end
pub struct SampleProducer {
    producer: HeapProducer<f32>,
}

impl SampleProducer {
    /// Write samples to buffer
    ///
    /// # Returns
    /// Number of samples actually written (less than `samples.len()` when full)
    pub fn write(&mut self, samples: &[f32]) -> usize {
        self.producer.push_slice(samples)
    }

    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }

    pub fn capacity(&self) -> usize {
        self.producer.capacity()
    }
}

/// Reading end
pub struct SampleConsumer {
    consumer: HeapConsumer<f32>,
}

impl SampleConsumer {
    /// Read up to `buffer.len()` samples, returning how many were read
    pub fn read(&mut self, buffer: &mut [f32]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Drop up to `count` queued samples
    pub fn discard(&mut self, count: usize) -> usize {
        self.consumer.skip(count)
    }

    /// Number of queued samples
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.consumer.capacity()
    }
}
