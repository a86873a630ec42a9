//! Sampling, aggregation and range adaptation.
//!
//! Everything here is synchronous and owned by a single caller; the
//! scheduler feeds one [`Sample`] per tick through [`Pipeline::observe`].

pub mod aggregate;
pub mod geometry;
pub mod history;
pub mod range;

pub use aggregate::{Aggregator, Readout};
pub use geometry::{affine, round_to};
pub use history::History;
pub use range::Range;

use gauge_core::Sample;

/// Range, history and aggregation mode for one data source.
#[derive(Debug, Clone)]
pub struct Pipeline {
    range:      Range,
    history:    History,
    aggregator: Aggregator,
}

impl Pipeline {
    pub fn new(range: Range, aggregator: Aggregator) -> Self {
        Self {
            range,
            history: aggregator.new_history(),
            aggregator,
        }
    }

    /// Feed one sample through the pipeline.
    ///
    /// Absent samples mutate nothing and yield `None`; present samples widen
    /// the range, enter the history and yield the new readout.
    pub fn observe(&mut self, sample: Sample) -> Option<Readout> {
        let value = sample.value()?;
        self.range = self.range.observe(sample);
        self.history.push(value);
        Some(self.aggregator.readout(&self.history, value))
    }

    /// Readout shown before the first sample.
    pub fn placeholder(&self) -> Readout {
        self.aggregator.placeholder(&self.history)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }
}
