//! Bounded sliding window of emitted samples.

use std::collections::VecDeque;

use phyzlab_sim::{Sample, SampleSink};

pub const DEFAULT_SAMPLE_CAPACITY: usize = 500;

/// Largest window a [`RuntimeConfig`](crate::RuntimeConfig) accepts.
pub const MAX_SAMPLE_CAPACITY: usize = 100_000;

/// FIFO of the most recent samples; the oldest is evicted once full.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SAMPLE_CAPACITY)
    }
}

impl SampleBuffer {
    /// Capacity is at least 1. Storage grows on demand up to the window.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(DEFAULT_SAMPLE_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }
}

impl SampleSink for SampleBuffer {
    fn accept(&mut self, sample: Sample) {
        self.push(sample);
    }
}
