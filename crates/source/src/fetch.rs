use futures::future::BoxFuture;
use gauge_config::AuthConfig;
use gauge_core::{GaugeError, Result};
use serde_json::Value;
use std::time::Duration;

/// Where to fetch from and with which credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url:  String,
    pub auth: Option<AuthConfig>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, auth: Option<AuthConfig>) -> Self {
        Self { url: url.into(), auth }
    }

    /// The URL without its query string, safe to log when tokens ride in it.
    pub fn redacted_url(&self) -> &str {
        self.url.split_once('?').map_or(&self.url, |(base, _)| base)
    }
}

/// Capability to fetch one JSON document.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<Value>>;
}

/// [`Fetch`] over HTTP(S) with `reqwest`.
///
/// Non-2xx responses and non-JSON bodies are fetch errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gauge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GaugeError::Fetch(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let url = request.redacted_url();

            let mut builder = self.client.get(&request.url);
            if let Some(auth) = &request.auth {
                builder = builder.basic_auth(&auth.username, Some(&auth.password));
            }

            let response = builder
                .send()
                .await
                .map_err(|e| GaugeError::Fetch(format!("GET {url}: {}", e.without_url())))?;

            let response = response
                .error_for_status()
                .map_err(|e| GaugeError::Fetch(format!("GET {url}: {}", e.without_url())))?;

            response
                .json::<Value>()
                .await
                .map_err(|e| GaugeError::Fetch(format!("GET {url}: invalid JSON: {}", e.without_url())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_query_string() {
        let req = FetchRequest::new("https://api.example/obs/1?token=secret", None);
        assert_eq!(req.redacted_url(), "https://api.example/obs/1");
    }

    #[test]
    fn redacting_plain_url_is_identity() {
        let req = FetchRequest::new("http://piaware/data/aircraft.json", None);
        assert_eq!(req.redacted_url(), "http://piaware/data/aircraft.json");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_millis(500)).unwrap();
        // Port 9 on localhost (discard) is almost never listening.
        let req = FetchRequest::new("http://127.0.0.1:9/", None);
        assert!(matches!(fetcher.fetch(&req).await, Err(GaugeError::Fetch(_))));
    }
}
