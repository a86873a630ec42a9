use crate::history::History;

/// How the current value is derived from the history.
///
/// Chosen once at startup from the source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    /// Average every held sample; suited to noisy single-value gauges.
    Averaging { samples: usize },
    /// Show the last `samples` values as individual bars.
    Chart { samples: usize },
}

/// What the renderer should put on screen for one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Readout {
    /// One number; `None` until the first sample arrives.
    Single { value: Option<f64> },
    /// The latest raw sample as a headline plus every history slot.
    Chart { latest: Option<f64>, bars: Vec<f64> },
}

impl Aggregator {
    pub fn capacity(&self) -> usize {
        match *self {
            Self::Averaging { samples } | Self::Chart { samples } => samples,
        }
    }

    /// Fresh history sized for this aggregator.  Charts start zero-padded.
    pub fn new_history(&self) -> History {
        match *self {
            Self::Averaging { samples } => History::new(samples),
            Self::Chart { samples } => History::zero_filled(samples),
        }
    }

    /// Output shown before any sample has been observed.
    pub fn placeholder(&self, history: &History) -> Readout {
        match self {
            Self::Averaging { .. } => Readout::Single { value: None },
            Self::Chart { .. } => Readout::Chart {
                latest: None,
                bars:   history.to_vec(),
            },
        }
    }

    /// Output after `latest` has been pushed into `history`.
    pub fn readout(&self, history: &History, latest: f64) -> Readout {
        match self {
            Self::Averaging { .. } => Readout::Single {
                value: Some(history.mean()),
            },
            Self::Chart { .. } => Readout::Chart {
                latest: Some(latest),
                bars:   history.to_vec(),
            },
        }
    }
}
