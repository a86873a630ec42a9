pub mod env;
pub mod schema;

pub use schema::{
    AuthConfig, CallbackConfig, DisplayBackend, DisplayConfig, FilterConfig, GaugeConfig,
    SourceConfig, CHART_HEADER_PX, DEFAULT_INTERVAL_SECS, DEFAULT_MIN_MAX,
    DEFAULT_SAMPLES_TO_AVERAGE, MAX_DISPLAY_PX,
};

use gauge_core::{GaugeError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Load configuration from a TOML file.  Returns `GaugeConfig::default()` if
/// the file doesn't exist; [`GaugeConfig::select`] then reports what's missing.
pub fn load(path: impl AsRef<Path>) -> Result<GaugeConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(GaugeConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GaugeError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from a TOML string.
pub fn parse(raw: &str) -> Result<GaugeConfig> {
    toml::from_str(raw).map_err(|e| GaugeError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gauge").join("gauge.toml")
}

/// How samples are aggregated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Show the rounded mean of the last `n` samples.
    Average(usize),
    /// Chart the last `n` samples as bars.
    Show(usize),
}

/// The validated, fully resolved source the scheduler will poll.
#[derive(Debug, Clone)]
pub struct SelectedSource {
    /// Data-type key, also used as the display label.
    pub key:           String,
    pub url:           String,
    pub auth:          Option<AuthConfig>,
    pub filter:        FilterConfig,
    pub min_max:       (f64, f64),
    pub interval:      Duration,
    pub fetch_timeout: Duration,
    pub mode:          SampleMode,
    pub callback:      Option<CallbackConfig>,
}

impl GaugeConfig {
    /// Validate the configuration and resolve the selected source, expanding
    /// `${VAR}` references from the process environment.
    pub fn select(&self) -> Result<SelectedSource> {
        self.select_with(|name| std::env::var(name).ok())
    }

    /// [`select`](Self::select) with an explicit variable lookup.
    pub fn select_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<SelectedSource> {
        let key = self
            .data_type
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GaugeError::Config("no data_type selected".into()))?;

        let source = self
            .sources
            .get(key)
            .ok_or_else(|| GaugeError::Config(format!("no source configured for '{key}'")))?;

        if source.url.trim().is_empty() {
            return Err(GaugeError::Config(format!("source '{key}' has no url")));
        }

        let [low, high] = source.min_max.unwrap_or(DEFAULT_MIN_MAX);
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(GaugeError::Config(format!(
                "source '{key}': min_max must be two finite numbers with low < high, got [{low}, {high}]"
            )));
        }

        let interval_secs = source.data_interval.unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(GaugeError::Config(format!(
                "source '{key}': data_interval must be at least 1 second"
            )));
        }
        let interval = Duration::from_secs(interval_secs);

        // A hung fetch must never eat the whole tick.
        let budget = interval.mul_f64(0.75);
        let fetch_timeout = match source.timeout_secs {
            Some(0) => {
                return Err(GaugeError::Config(format!(
                    "source '{key}': timeout_secs must be at least 1"
                )))
            }
            Some(secs) => Duration::from_secs(secs).min(budget),
            None => budget,
        };

        let mode = match (source.samples_to_average, source.samples_to_show) {
            (Some(_), Some(_)) => {
                return Err(GaugeError::Config(format!(
                    "source '{key}': set either samples_to_average or samples_to_show, not both"
                )))
            }
            (_, Some(n)) => SampleMode::Show(n),
            (Some(n), None) => SampleMode::Average(n),
            (None, None) => SampleMode::Average(DEFAULT_SAMPLES_TO_AVERAGE),
        };
        self.validate_mode(key, mode)?;

        let expand = |s: &str| env::expand(s, &lookup);
        let auth = source.auth.as_ref().map(|a| expand_auth(a, &expand)).transpose()?;
        let callback = source
            .callback
            .as_ref()
            .map(|cb| -> Result<CallbackConfig> {
                Ok(CallbackConfig {
                    url:  expand(&cb.url)?,
                    auth: cb.auth.as_ref().map(|a| expand_auth(a, &expand)).transpose()?,
                })
            })
            .transpose()?;

        Ok(SelectedSource {
            key: key.to_string(),
            url: expand(&source.url)?,
            auth,
            filter: source.filter.clone(),
            min_max: (low, high),
            interval,
            fetch_timeout,
            mode,
            callback,
        })
    }

    fn validate_mode(&self, key: &str, mode: SampleMode) -> Result<()> {
        let display = &self.display;
        if display.width == 0 || display.height == 0 {
            return Err(GaugeError::Config(format!(
                "display must be at least 1x1 pixels, got {}x{}",
                display.width, display.height
            )));
        }
        if display.width > MAX_DISPLAY_PX || display.height > MAX_DISPLAY_PX {
            return Err(GaugeError::Config(format!(
                "display must be at most {MAX_DISPLAY_PX}x{MAX_DISPLAY_PX} pixels, got {}x{}",
                display.width, display.height
            )));
        }

        match mode {
            SampleMode::Average(0) | SampleMode::Show(0) => Err(GaugeError::Config(format!(
                "source '{key}': sample count must be at least 1"
            ))),
            SampleMode::Show(n) if n as u64 > display.width as u64 => {
                Err(GaugeError::Config(format!(
                    "source '{key}': samples_to_show ({n}) exceeds display width ({})",
                    display.width
                )))
            }
            SampleMode::Show(_) if display.height <= CHART_HEADER_PX => {
                Err(GaugeError::Config(format!(
                    "display height {} leaves no room below the {CHART_HEADER_PX}px chart header",
                    display.height
                )))
            }
            _ => Ok(()),
        }
    }
}

fn expand_auth(auth: &AuthConfig, expand: impl Fn(&str) -> Result<String>) -> Result<AuthConfig> {
    Ok(AuthConfig {
        username: expand(&auth.username)?,
        password: expand(&auth.password)?,
    })
}
