use chrono::{DateTime, Local};
use serde::Serialize;

/// One observation from a data source.
///
/// `Absent` marks a tick where the fetch failed or the filter found nothing;
/// it never mutates range or history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sample {
    Value(f64),
    #[default]
    Absent,
}

impl Sample {
    /// Build a sample from an extracted number.  Non-finite values are absent.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Value(v),
            _ => Self::Absent,
        }
    }

    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent => None,
        }
    }

    #[inline]
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Self::from_option(Some(value))
    }
}

/// A present sample tagged with where and when it was observed.
///
/// This is the payload handed to per-sample callbacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Configured data-type key, e.g. `"wind"`.
    pub source: String,
    pub value: f64,
    pub observed_at: DateTime<Local>,
}

impl Reading {
    pub fn now(source: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            value,
            observed_at: Local::now(),
        }
    }
}
