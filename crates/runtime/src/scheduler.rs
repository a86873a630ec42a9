use gauge_core::{Reading, Result};
use gauge_pipeline::{Pipeline, Readout};
use gauge_renderer::{format_headline, format_mean, Renderer};
use gauge_source::{dispatch, Callback, Sampler};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

/// Lifecycle of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but the display hasn't been brought up.
    Idle,
    /// Ticking.
    Running,
    /// The process is exiting.
    Stopped,
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A sample was folded in and this readout was drawn.
    Rendered(Readout),
    /// The fetch failed or timed out; nothing changed.
    FetchFailed,
    /// The response held no usable number; nothing changed.
    NoValue,
}

/// Owns all per-source state and runs one tick at a time.
///
/// Range and history live inside [`Pipeline`] and are only touched from
/// [`tick`](Scheduler::tick), so ticks never interleave their mutations.
pub struct Scheduler {
    key:      String,
    phase:    Phase,
    interval: Duration,
    panel:    (u8, u16),
    sampler:  Sampler,
    pipeline: Pipeline,
    renderer: Renderer,
    callback: Option<Arc<dyn Callback>>,
}

impl Scheduler {
    pub fn new(
        key: impl Into<String>,
        interval: Duration,
        sampler: Sampler,
        pipeline: Pipeline,
        renderer: Renderer,
    ) -> Self {
        Self {
            key: key.into(),
            phase: Phase::Idle,
            interval,
            panel: (1, 0x3c),
            sampler,
            pipeline,
            renderer,
            callback: None,
        }
    }

    #[must_use]
    pub fn with_callback(mut self, callback: Option<Arc<dyn Callback>>) -> Self {
        self.callback = callback;
        self
    }

    /// I2C bus and address handed to the display on start.
    #[must_use]
    pub fn with_panel(mut self, bus: u8, address: u16) -> Self {
        self.panel = (bus, address);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// `Idle → Running`: bring the display up and show the placeholder.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != Phase::Idle {
            return Ok(());
        }
        let (bus, address) = self.panel;
        self.renderer.start(bus, address)?;
        self.renderer
            .render(&self.pipeline.placeholder(), self.pipeline.range())?;
        self.phase = Phase::Running;
        info!("'{}' running", self.key);
        Ok(())
    }

    /// Sample once and, on success, fold the sample in and redraw.
    ///
    /// Never fails: every problem is logged and the next tick starts clean.
    pub async fn tick(&mut self) -> TickOutcome {
        let sample = match self.sampler.sample().await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{}: {e}; skipping tick", self.key);
                return TickOutcome::FetchFailed;
            }
        };

        let Some(readout) = self.pipeline.observe(sample) else {
            warn!("{}: response held no usable value; skipping tick", self.key);
            return TickOutcome::NoValue;
        };

        let range = self.pipeline.range();
        info!(
            source = %self.key,
            history = ?self.pipeline.history().to_vec(),
            "{} ({}-{})",
            summarize(&readout),
            range.low(),
            range.high()
        );

        if let Err(e) = self.renderer.render(&readout, range) {
            error!("Display update failed: {e}");
        }

        if let (Some(callback), Some(value)) = (&self.callback, sample.value()) {
            dispatch(Arc::clone(callback), Reading::now(self.key.as_str(), value));
        }

        TickOutcome::Rendered(readout)
    }

    /// Tick every `interval` until Ctrl-C.
    ///
    /// A tick that overruns the interval delays the next one instead of
    /// overlapping it.  The first tick fires immediately.
    pub async fn run(mut self) -> Result<()> {
        self.start()?;

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                () = &mut shutdown => break,
            }
        }

        self.stop();
        Ok(())
    }

    /// `Running → Stopped`: blank the panel on the way out.
    fn stop(&mut self) {
        self.phase = Phase::Stopped;
        info!("'{}' stopping", self.key);
        if let Err(e) = self.renderer.clear() {
            warn!("Could not clear display on shutdown: {e}");
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("key", &self.key)
            .field("phase", &self.phase)
            .field("interval", &self.interval)
            .field("sampler", &self.sampler)
            .field("pipeline", &self.pipeline)
            .field("renderer", &self.renderer)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Resolves on Ctrl-C.  If the handler can't be installed, never resolves.
/// Log text for a readout. Charts report the latest raw sample since their
/// history is zero-padded.
fn summarize(readout: &Readout) -> String {
    match *readout {
        Readout::Single { value: Some(v) } => format!("avg={}", format_mean(v)),
        Readout::Chart { latest: Some(v), .. } => format!("latest={}", format_headline(v)),
        Readout::Single { value: None } | Readout::Chart { latest: None, .. } => "no data".into(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for Ctrl-C: {e}; running until killed");
        std::future::pending::<()>().await;
    }
}
