//! Data-source side of the gauge: fetching, extraction and per-sample
//! callbacks.

pub mod callback;
pub mod fetch;
pub mod filter;
pub mod sampler;

pub use callback::{dispatch, Callback, Webhook};
pub use fetch::{Fetch, FetchRequest, HttpFetcher};
pub use filter::{Extract, Filter};
pub use sampler::Sampler;
