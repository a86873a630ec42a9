//! Runtime for `gauge`.
//!
//! Builds every component from the validated configuration and drives them
//! from a single periodic timer:
//! - Sampler: one HTTP fetch + extraction per tick (the only await point)
//! - Pipeline: range widening, history, aggregation
//! - Renderer: one batched frame per successful tick
//! - Callback: detached webhook per sample, outcome only logged

pub mod scheduler;

pub use scheduler::{Phase, Scheduler, TickOutcome};

use gauge_config::{DisplayBackend, GaugeConfig, SampleMode};
use gauge_core::Result;
use gauge_pipeline::{Aggregator, Pipeline, Range};
use gauge_renderer::{Display, Layout, Renderer, TerminalDisplay};
use gauge_source::{Callback, FetchRequest, Filter, HttpFetcher, Sampler, Webhook};
use std::sync::Arc;
use tracing::info;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Validate `config`, bring the display up and poll until the process is
/// told to stop.
pub async fn run(config: GaugeConfig, headless: bool) -> Result<()> {
    build(&config, headless)?.run().await
}

/// Wire a [`Scheduler`] from configuration.  Fails with a config error when
/// the selected source is missing or invalid.
pub fn build(config: &GaugeConfig, headless: bool) -> Result<Scheduler> {
    let source = config.select()?;
    info!(
        "Polling '{}' every {:?} (fetch timeout {:?})",
        source.key, source.interval, source.fetch_timeout
    );

    let fetcher = Arc::new(HttpFetcher::new(source.fetch_timeout)?);
    let sampler = Sampler::new(
        FetchRequest::new(source.url.clone(), source.auth.clone()),
        fetcher,
        Box::new(Filter::from(&source.filter)),
        source.fetch_timeout,
    );

    let aggregator = match source.mode {
        SampleMode::Average(samples) => Aggregator::Averaging { samples },
        SampleMode::Show(samples) => Aggregator::Chart { samples },
    };
    let range = Range::new(source.min_max.0, source.min_max.1)?;
    let pipeline = Pipeline::new(range, aggregator);

    let display = &config.display;
    let panel: Option<Box<dyn Display>> = match (headless, display.backend) {
        (true, _) | (_, DisplayBackend::None) => None,
        (false, DisplayBackend::Terminal) => {
            Some(Box::new(TerminalDisplay::stdout(display.width, display.height)))
        }
    };
    let renderer = Renderer::new(panel, Layout::from_config(display), source.key.as_str());

    let callback = source
        .callback
        .clone()
        .map(|cb| Webhook::new(cb, source.interval).map(|hook| Arc::new(hook) as Arc<dyn Callback>))
        .transpose()?;

    Ok(Scheduler::new(source.key, source.interval, sampler, pipeline, renderer)
        .with_callback(callback)
        .with_panel(display.bus, display.address))
}
