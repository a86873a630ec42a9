use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seconds between ticks when a source doesn't set `data_interval`.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;
/// Averaging window when a source sets neither sample count.
pub const DEFAULT_SAMPLES_TO_AVERAGE: usize = 1;
/// Initial range guess when a source doesn't set `min_max`.
pub const DEFAULT_MIN_MAX: [f64; 2] = [0.0, 10.0];
/// Height of the text band above the chart area, in pixels.
pub const CHART_HEADER_PX: u32 = 15;
/// Largest accepted display edge, in pixels.
pub const MAX_DISPLAY_PX: u32 = 1024;

/// Root configuration structure parsed from `gauge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GaugeConfig {
    /// Key into `sources` selecting what to display, e.g. `"wind"`.
    pub data_type: Option<String>,
    /// Panel wiring and geometry.
    pub display: DisplayConfig,
    /// All known data sources, keyed by data type.
    pub sources: HashMap<String, SourceConfig>,
}

/// Display bus, address and pixel dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// I2C bus number.
    pub bus: u8,
    /// I2C device address (`0x3c` for most SSD1306 panels).
    pub address: u16,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Where frames go.
    pub backend: DisplayBackend,
    /// Draw a thin bar under the title proportional to the value (single-value mode).
    pub value_bar: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bus:       1,
            address:   0x3c,
            width:     128,
            height:    64,
            backend:   DisplayBackend::Terminal,
            value_bar: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBackend {
    /// Render frames to stdout.
    #[default]
    Terminal,
    /// Headless: no display at all.
    None,
}

/// Config block for a single data source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Endpoint returning JSON.  May contain `${VAR}` references.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// How to turn the response body into a number.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Initial `[low, high]` guess; widened at runtime.
    #[serde(default)]
    pub min_max: Option<[f64; 2]>,
    /// Seconds between polls.
    #[serde(default)]
    pub data_interval: Option<u64>,
    /// Upper bound on a single fetch, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Average this many recent samples into one number.
    #[serde(default)]
    pub samples_to_average: Option<usize>,
    /// Chart this many recent samples as bars.
    #[serde(default)]
    pub samples_to_show: Option<usize>,
    /// Webhook receiving every sample.
    #[serde(default)]
    pub callback: Option<CallbackConfig>,
}

/// HTTP basic credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

/// Extraction rule applied to the JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterConfig {
    /// The number (or numeric string) at a JSON Pointer.
    Value {
        #[serde(default)]
        pointer: String,
    },
    /// How many elements of the array at `pointer` match.
    Count {
        #[serde(default)]
        pointer: String,
        /// Only count elements where this field is present and truthy.
        #[serde(default)]
        field: Option<String>,
        /// Only count elements whose `field` equals one of these strings.
        #[serde(default)]
        any_of: Vec<String>,
    },
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::Value { pointer: String::new() }
    }
}

/// Where each sample is posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    pub url: String,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}
