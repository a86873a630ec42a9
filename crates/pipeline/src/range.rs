use gauge_core::{GaugeError, Result, Sample};

/// Adaptive `[low, high]` bounds used for display scaling and clamping.
///
/// Starts from a configured guess and only ever widens: once a sample has
/// pushed a bound outward it stays there for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    low:  f64,
    high: f64,
}

impl Range {
    /// Initial guess used when a source doesn't configure `min_max`.
    pub const DEFAULT: Self = Self { low: 0.0, high: 10.0 };

    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(GaugeError::Config(format!(
                "range bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low > high {
            return Err(GaugeError::Config(format!(
                "range low bound {low} is above high bound {high}"
            )));
        }
        Ok(Self { low, high })
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// `(low, high)` as a geometry domain.
    #[inline]
    pub fn as_domain(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Widen the range to include `sample`.  Absent samples leave it untouched.
    #[must_use]
    pub fn observe(self, sample: Sample) -> Self {
        let Some(value) = sample.value() else {
            return self;
        };

        let mut next = self;
        if value < next.low {
            next.low = value;
        }
        if value > next.high {
            next.high = value;
        }

        if next != self {
            tracing::debug!(
                "range widened ({}, {}) -> ({}, {})",
                self.low, self.high, next.low, next.high
            );
        }
        next
    }

    /// Saturate `value` into `[low, high]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.low).min(self.high)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::DEFAULT
    }
}
