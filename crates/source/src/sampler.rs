use crate::fetch::{Fetch, FetchRequest};
use crate::filter::Extract;
use gauge_core::{GaugeError, Result, Sample};
use std::sync::Arc;
use std::time::Duration;

/// Fetches one sample per call from a single configured source.
pub struct Sampler {
    request: FetchRequest,
    fetcher: Arc<dyn Fetch>,
    extract: Box<dyn Extract>,
    timeout: Duration,
}

impl Sampler {
    pub fn new(
        request: FetchRequest,
        fetcher: Arc<dyn Fetch>,
        extract: Box<dyn Extract>,
        timeout: Duration,
    ) -> Self {
        Self { request, fetcher, extract, timeout }
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    /// Fetch and extract one sample.
    ///
    /// Transport, HTTP and timeout failures are `Err`; a document without a
    /// usable number is `Ok(Sample::Absent)`.
    pub async fn sample(&self) -> Result<Sample> {
        let body = tokio::time::timeout(self.timeout, self.fetcher.fetch(&self.request))
            .await
            .map_err(|_| {
                GaugeError::Fetch(format!(
                    "GET {}: timed out after {:?}",
                    self.request.redacted_url(),
                    self.timeout
                ))
            })??;

        let sample = Sample::from_option(self.extract.extract(&body));
        if sample.is_absent() {
            tracing::debug!("No value in response from {}", self.request.redacted_url());
        }
        Ok(sample)
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("url", &self.request.redacted_url())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use serde_json::{json, Value};

    struct Canned(Result<Value, String>);

    impl Fetch for Canned {
        fn fetch<'a>(&'a self, _request: &'a FetchRequest) -> BoxFuture<'a, Result<Value>> {
            let result = self.0.clone().map_err(GaugeError::Fetch);
            Box::pin(async move { result })
        }
    }

    struct Hangs;

    impl Fetch for Hangs {
        fn fetch<'a>(&'a self, _request: &'a FetchRequest) -> BoxFuture<'a, Result<Value>> {
            Box::pin(futures::future::pending())
        }
    }

    fn sampler(fetcher: impl Fetch + 'static) -> Sampler {
        Sampler::new(
            FetchRequest::new("http://source.test/value?token=x", None),
            Arc::new(fetcher),
            Box::new(|body: &Value| body.get("v").and_then(Value::as_f64)),
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn extracts_value() {
        let s = sampler(Canned(Ok(json!({ "v": 3.5 }))));
        assert_eq!(s.sample().await.unwrap(), Sample::Value(3.5));
    }

    #[tokio::test]
    async fn missing_value_is_absent_not_error() {
        let s = sampler(Canned(Ok(json!({ "other": 1 }))));
        assert_eq!(s.sample().await.unwrap(), Sample::Absent);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let s = sampler(Canned(Err("503 Service Unavailable".into())));
        assert!(matches!(s.sample().await, Err(GaugeError::Fetch(_))));
    }

    #[tokio::test]
    async fn hung_fetch_times_out() {
        let s = sampler(Hangs);
        let err = s.sample().await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(!err.to_string().contains("token"));
    }
}
