use gauge_core::Result;

/// Monochrome pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    Black,
    #[default]
    White,
}

/// Drawing layer.  Single-layer panels ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Layer0,
    Layer1,
}

/// Bitmap font selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    UbuntuMono8pt,
}

/// A small buffered pixel display.
///
/// Draw calls only touch the back buffer; nothing is visible until
/// [`refresh`](Display::refresh).  Coordinates are pixels from the top-left
/// and may fall partly off-screen, in which case they are clipped.
pub trait Display: Send {
    /// Open the device on `bus` at `address`.
    fn init(&mut self, bus: u8, address: u16) -> Result<()>;

    fn set_font(&mut self, font: Font);

    fn turn_on(&mut self) -> Result<()>;

    fn clear_screen(&mut self);

    fn draw_string(&mut self, x: i32, y: i32, text: &str, size: f32, color: Color, layer: Layer);

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, layer: Layer);

    /// Push the back buffer to the panel.
    fn refresh(&mut self) -> Result<()>;
}
