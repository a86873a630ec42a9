pub mod error;
pub mod sample;

pub use error::{GaugeError, Result};
pub use sample::{Reading, Sample};
