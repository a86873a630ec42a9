use futures::future::BoxFuture;
use gauge_config::CallbackConfig;
use gauge_core::{GaugeError, Reading, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Side effect run with every present sample.
pub trait Callback: Send + Sync {
    fn call(&self, reading: Reading) -> BoxFuture<'static, Result<()>>;
}

/// POSTs each [`Reading`] as JSON to a configured URL.
#[derive(Debug, Clone)]
pub struct Webhook {
    client: reqwest::Client,
    config: CallbackConfig,
}

impl Webhook {
    pub fn new(config: CallbackConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gauge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GaugeError::Config(format!("cannot build callback client: {e}")))?;
        Ok(Self { client, config })
    }
}

impl Callback for Webhook {
    fn call(&self, reading: Reading) -> BoxFuture<'static, Result<()>> {
        let mut builder = self.client.post(&self.config.url).json(&reading);
        if let Some(auth) = &self.config.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        Box::pin(async move {
            let response = builder.send().await.map_err(|e| GaugeError::Callback {
                status: e.status().map(|s| s.as_u16()),
                reason: e.without_url().to_string(),
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(GaugeError::Callback {
                    status: Some(status.as_u16()),
                    reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                });
            }
            Ok(())
        })
    }
}

/// Run `callback` with `reading` on a detached task.
///
/// The outcome is only logged; the returned handle exists so tests can wait
/// for completion.
pub fn dispatch(callback: Arc<dyn Callback>, reading: Reading) -> JoinHandle<()> {
    tokio::spawn(async move {
        let value = reading.value;
        match callback.call(reading).await {
            Ok(()) => tracing::debug!("Callback finished for {value}"),
            Err(e) => tracing::warn!("Callback error: {e}"),
        }
    })
}
