use std::collections::VecDeque;

use crate::geometry::round_to;

/// Rolling history of recent samples, oldest first.
///
/// Capacity is fixed at construction; every push past it evicts the oldest
/// entry.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// A history already holding `capacity` zeros, so a chart always has a
    /// full set of bars even before real samples arrive.
    pub fn zero_filled(capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.samples.extend(std::iter::repeat(0.0).take(capacity));
        history
    }

    /// Push a new sample, evicting the oldest if over capacity.
    /// Returns the evicted value.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        }
    }

    /// Mean of every held sample, rounded to one decimal place.
    ///
    /// Divides by the current count, so a partially filled history still
    /// yields a valid average.
    pub fn mean(&self) -> f64 {
        match self.samples.len() {
            0 => 0.0,
            1 => round_to(self.samples[0], 1),
            n => round_to(self.samples.iter().sum::<f64>() / n as f64, 1),
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
