//! Layout and drawing for the gauge panel.
//!
//! [`Renderer`] turns a [`Readout`] plus the current [`Range`] into draw
//! calls on an injected [`Display`].  Without a display it does nothing,
//! which is how headless runs and most tests operate.

pub mod display;
pub mod layout;
pub mod memory;
pub mod terminal;

pub use display::{Color, Display, Font, Layer};
pub use layout::Layout;
pub use memory::{DrawOp, Frame, MemoryDisplay, TextRun};
pub use terminal::TerminalDisplay;

use gauge_core::Result;
use gauge_pipeline::{affine, Range, Readout};
use layout::{
    TITLE_GLYPH_WIDTH, TITLE_SIZE, VALUE_BAR_HEIGHT, VALUE_BAR_TOP, VALUE_GLYPH_WIDTH, VALUE_SIZE,
    VALUE_TOP,
};
use tracing::warn;

/// Text shown before any sample has arrived.
const PLACEHOLDER: &str = "--";

pub struct Renderer {
    display: Option<Box<dyn Display>>,
    layout:  Layout,
    label:   String,
}

impl Renderer {
    pub fn new(display: Option<Box<dyn Display>>, layout: Layout, label: impl Into<String>) -> Self {
        Self {
            display,
            layout,
            label: label.into().to_uppercase(),
        }
    }

    /// A renderer that draws nothing.
    pub fn headless(layout: Layout, label: impl Into<String>) -> Self {
        Self::new(None, layout, label)
    }

    pub fn is_headless(&self) -> bool {
        self.display.is_none()
    }

    /// Bring the panel up: open it, pick the font, switch it on and clear it.
    pub fn start(&mut self, bus: u8, address: u16) -> Result<()> {
        let Some(display) = self.display.as_deref_mut() else {
            return Ok(());
        };
        display.init(bus, address)?;
        display.set_font(Font::UbuntuMono8pt);
        display.turn_on()?;
        display.clear_screen();
        display.refresh()
    }

    /// Draw one frame and make it visible.
    pub fn render(&mut self, readout: &Readout, range: Range) -> Result<()> {
        let Some(display) = self.display.as_deref_mut() else {
            return Ok(());
        };

        display.clear_screen();
        match readout {
            Readout::Single { value } => {
                draw_single(display, &self.layout, &self.label, *value, range)
            }
            Readout::Chart { latest, bars } => {
                draw_chart(display, &self.layout, &self.label, *latest, bars, range)
            }
        }
        display.refresh()
    }

    /// Blank the panel, e.g. on shutdown.
    pub fn clear(&mut self) -> Result<()> {
        let Some(display) = self.display.as_deref_mut() else {
            return Ok(());
        };
        display.clear_screen();
        display.refresh()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("headless", &self.is_headless())
            .field("layout", &self.layout)
            .field("label", &self.label)
            .finish()
    }
}

/// Label on top, the clamped value large and centred below it.
fn draw_single(
    display: &mut dyn Display,
    layout: &Layout,
    label: &str,
    value: Option<f64>,
    range: Range,
) {
    let shown = value.map(|v| range.clamp(v));

    display.draw_string(
        layout.centered_x(label.chars().count(), TITLE_GLYPH_WIDTH),
        0,
        label,
        TITLE_SIZE,
        Color::White,
        Layer::Layer0,
    );

    if layout.value_bar {
        let basis = shown.unwrap_or(range.low());
        let width = match affine(basis, range.as_domain(), (1.0, layout.width as f64)) {
            Ok(w) => w.round().max(1.0) as u32,
            Err(e) => {
                warn!("Value bar: {e}");
                1
            }
        };
        display.fill_rect(0, VALUE_BAR_TOP, width, VALUE_BAR_HEIGHT, Color::White, Layer::Layer0);
    }

    let text = shown.map_or_else(|| PLACEHOLDER.to_string(), format_mean);
    display.draw_string(
        layout.centered_x(text.chars().count(), VALUE_GLYPH_WIDTH),
        VALUE_TOP,
        &text,
        VALUE_SIZE,
        Color::White,
        Layer::Layer0,
    );
}

/// `LABEL: latest` header with one bottom-anchored bar per history slot.
fn draw_chart(
    display: &mut dyn Display,
    layout: &Layout,
    label: &str,
    latest: Option<f64>,
    bars: &[f64],
    range: Range,
) {
    let headline = latest.map_or_else(|| PLACEHOLDER.to_string(), format_headline);
    display.draw_string(
        0,
        0,
        &format!("{label}: {headline}"),
        TITLE_SIZE,
        Color::White,
        Layer::Layer0,
    );

    let column = layout.column_width(bars.len());
    if column == 0 {
        warn!(
            "{} bars do not fit in {}px; skipping chart",
            bars.len(),
            layout.width
        );
        return;
    }
    // Leave a one-pixel gutter between columns when there is room for it.
    let bar_width = if column > 1 { column - 1 } else { 1 };
    let top = layout.chart_height().saturating_sub(1) as f64;
    let bottom = layout.height as i32;

    for (i, &value) in bars.iter().enumerate() {
        let x = (i as u32 * column) as i32;
        let height = match affine(value, range.as_domain(), (0.0, top)) {
            Ok(h) => h.round() as u32,
            Err(e) => {
                warn!("Bar {i}: {e}");
                0
            }
        };
        if height > 0 {
            display.fill_rect(x, bottom - height as i32, bar_width, height, Color::White, Layer::Layer0);
        }
        // Baseline keeps empty columns visible.
        display.fill_rect(x, bottom - 1, bar_width, 1, Color::White, Layer::Layer0);
    }
}

/// Averages always show one decimal: `7` → `"7.0"`.
pub fn format_mean(value: f64) -> String {
    format!("{value:.1}")
}

/// Raw samples print as-is: `8` → `"8"`, `7.4` → `"7.4"`.
pub fn format_headline(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(value_bar: bool) -> (MemoryDisplay, Renderer) {
        let display = MemoryDisplay::new(128, 64);
        let layout = Layout { value_bar, ..Layout::new(128, 64) };
        let renderer = Renderer::new(Some(Box::new(display.clone())), layout, "wind");
        (display, renderer)
    }

    fn range(low: f64, high: f64) -> Range {
        Range::new(low, high).unwrap()
    }

    #[test]
    fn format_mean_keeps_one_decimal() {
        assert_eq!(format_mean(7.0), "7.0");
        assert_eq!(format_mean(2.25), "2.3");
    }

    #[test]
    fn format_headline_is_minimal() {
        assert_eq!(format_headline(8.0), "8");
        assert_eq!(format_headline(7.4), "7.4");
    }

    #[test]
    fn start_brings_panel_up() {
        let (display, mut renderer) = fixture(false);
        renderer.start(1, 0x3c).unwrap();
        assert_eq!(display.address(), Some((1, 0x3c)));
        assert_eq!(display.font(), Some(Font::UbuntuMono8pt));
        assert!(display.is_on());
        assert_eq!(display.refresh_count(), 1);
    }

    #[test]
    fn single_value_is_centred_and_clamped() {
        let (display, mut renderer) = fixture(false);
        renderer
            .render(&Readout::Single { value: Some(42.0) }, range(0.0, 10.0))
            .unwrap();

        let frame = display.snapshot();
        assert_eq!(frame.ops[0], DrawOp::Clear);
        assert_eq!(frame.texts.len(), 2);
        assert_eq!((frame.texts[0].x, frame.texts[0].y), (54, 0));
        assert_eq!(frame.texts[0].text, "WIND");
        assert_eq!(frame.texts[1].text, "10.0");
        assert_eq!((frame.texts[1].x, frame.texts[1].y), (24, VALUE_TOP));
        assert_eq!(display.refresh_count(), 1);
    }

    #[test]
    fn single_placeholder_before_first_sample() {
        let (display, mut renderer) = fixture(true);
        renderer
            .render(&Readout::Single { value: None }, range(0.0, 10.0))
            .unwrap();

        let frame = display.snapshot();
        assert_eq!(frame.texts[1].text, "--");
        // Placeholder bar sits at the low bound: one pixel wide.
        assert_eq!(frame.rects().collect::<Vec<_>>(), vec![(0, VALUE_BAR_TOP, 1, VALUE_BAR_HEIGHT)]);
    }

    #[test]
    fn value_bar_scales_with_value() {
        let (display, mut renderer) = fixture(true);
        renderer
            .render(&Readout::Single { value: Some(10.0) }, range(0.0, 10.0))
            .unwrap();
        let rects: Vec<_> = display.snapshot().rects().collect();
        assert_eq!(rects, vec![(0, VALUE_BAR_TOP, 128, VALUE_BAR_HEIGHT)]);
    }

    #[test]
    fn chart_draws_one_column_per_slot() {
        let (display, mut renderer) = fixture(false);
        let readout = Readout::Chart {
            latest: Some(8.0),
            bars:   vec![0.0, 5.0, 10.0, 20.0],
        };
        renderer.render(&readout, range(0.0, 10.0)).unwrap();

        let frame = display.snapshot();
        assert_eq!(frame.texts[0].text, "WIND: 8");
        assert_eq!((frame.texts[0].x, frame.texts[0].y), (0, 0));

        // 128 / 4 = 32px columns, 31px bars, chart height 49 -> max bar 48px.
        assert_eq!(frame.lit_from_bottom(0), 1); // baseline only
        assert_eq!(frame.lit_from_bottom(32), 24);
        assert_eq!(frame.lit_from_bottom(64), 48);
        assert_eq!(frame.lit_from_bottom(96), 48); // saturated, headline unclamped
        assert!(!frame.pixel(31, 63)); // gutter
        assert_eq!(display.refresh_count(), 1);
    }

    #[test]
    fn chart_placeholder_shows_dashes_and_baselines() {
        let (display, mut renderer) = fixture(false);
        let readout = Readout::Chart { latest: None, bars: vec![0.0; 10] };
        renderer.render(&readout, range(0.0, 10.0)).unwrap();

        let frame = display.snapshot();
        assert_eq!(frame.texts[0].text, "WIND: --");
        assert_eq!(frame.rects().count(), 10);
        for col in 0..10 {
            assert_eq!(frame.lit_from_bottom(col * 12), 1);
        }
    }

    #[test]
    fn chart_with_negative_range_anchors_low_bound_at_zero() {
        let (display, mut renderer) = fixture(false);
        let readout = Readout::Chart { latest: Some(-2.0), bars: vec![-2.0, 15.0] };
        renderer.render(&readout, range(-2.0, 15.0)).unwrap();

        let frame = display.snapshot();
        assert_eq!(frame.texts[0].text, "WIND: -2");
        assert_eq!(frame.lit_from_bottom(0), 1);
        assert_eq!(frame.lit_from_bottom(64), 48);
    }

    #[test]
    fn headless_renderer_is_a_no_op() {
        let display = MemoryDisplay::new(128, 64);
        let mut renderer = Renderer::new(None, Layout::new(128, 64), "wind");
        assert!(renderer.is_headless());
        renderer.start(1, 0x3c).unwrap();
        renderer
            .render(&Readout::Single { value: Some(1.0) }, Range::DEFAULT)
            .unwrap();
        let chart = Readout::Chart { latest: Some(3.0), bars: vec![1.0, 2.0, 3.0] };
        renderer.render(&chart, Range::DEFAULT).unwrap();
        renderer.clear().unwrap();

        assert_eq!(display.refresh_count(), 0);
        assert!(!display.is_on());
        assert_eq!(display.address(), None);
        let frame = display.snapshot();
        assert!(frame.texts.is_empty());
        assert_eq!(frame.rects().count(), 0);
        assert_eq!(frame.lit_from_bottom(0), 0);
    }

    #[test]
    fn headless_constructor_has_no_display() {
        assert!(Renderer::headless(Layout::new(128, 64), "wind").is_headless());
    }
}
