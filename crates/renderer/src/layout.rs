use gauge_config::{DisplayConfig, CHART_HEADER_PX};

/// Font size of the label line.
pub const TITLE_SIZE: f32 = 1.5;
/// Horizontal advance per character at [`TITLE_SIZE`].
pub const TITLE_GLYPH_WIDTH: f64 = 5.0;
/// Font size of the big single value.
pub const VALUE_SIZE: f32 = 5.0;
/// Horizontal advance per character at [`VALUE_SIZE`].
pub const VALUE_GLYPH_WIDTH: f64 = 20.0;
/// Top of the big single value.
pub const VALUE_TOP: i32 = 17;
/// Top and thickness of the optional value bar under the title.
pub const VALUE_BAR_TOP: i32 = 13;
pub const VALUE_BAR_HEIGHT: u32 = 2;

/// Pixel geometry of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width:     u32,
    pub height:    u32,
    pub value_bar: bool,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, value_bar: false }
    }

    /// Build a [`Layout`] from the loaded configuration.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            width:     config.width,
            height:    config.height,
            value_bar: config.value_bar,
        }
    }

    /// Height available to bars below the header band.
    pub fn chart_height(&self) -> u32 {
        self.height.saturating_sub(CHART_HEADER_PX)
    }

    /// Width of one bar column when `count` columns share the panel.
    pub fn column_width(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }
        (self.width as usize / count) as u32
    }

    /// Left edge that centres `chars` characters of `glyph_width` pixels.
    ///
    /// May be negative when the text is wider than the panel.
    pub fn centered_x(&self, chars: usize, glyph_width: f64) -> i32 {
        (self.width as f64 / 2.0 - (chars as f64 / 2.0) * glyph_width).floor() as i32
    }
}
