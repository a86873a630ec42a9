use crate::display::{Color, Display, Font, Layer};
use gauge_core::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Text {
        x:     i32,
        y:     i32,
        text:  String,
        size:  f32,
        color: Color,
        layer: Layer,
    },
    Rect {
        x:     i32,
        y:     i32,
        w:     u32,
        h:     u32,
        color: Color,
        layer: Layer,
    },
}

/// Text placed on a frame, kept as a string since the buffer has no glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x:    i32,
    pub y:    i32,
    pub text: String,
    pub size: f32,
}

/// A committed frame: lit pixels, text runs, and the draw calls that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    pixels:     Vec<bool>,
    pub texts:  Vec<TextRun>,
    pub ops:    Vec<DrawOp>,
}

impl Frame {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width as usize) * (height as usize)],
            texts:  Vec::new(),
            ops:    Vec::new(),
        }
    }

    /// Whether the pixel at `(x, y)` is lit.  Off-screen pixels are dark.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Number of contiguous lit pixels in column `x`, counted up from the
    /// bottom row.
    pub fn lit_from_bottom(&self, x: u32) -> u32 {
        (0..self.height)
            .rev()
            .take_while(|&y| self.pixel(x, y))
            .count() as u32
    }

    /// Rectangles drawn into this frame, in call order.
    pub fn rects(&self) -> impl Iterator<Item = (i32, i32, u32, u32)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::Rect { x, y, w, h, .. } => Some((x, y, w, h)),
            _ => None,
        })
    }

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
        self.texts.clear();
    }

    fn fill(&mut self, x: i32, y: i32, w: u32, h: u32, on: bool) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels[(py * self.width as i64 + px) as usize] = on;
            }
        }
    }
}

#[derive(Debug)]
struct Panel {
    back:      Frame,
    front:     Frame,
    font:      Option<Font>,
    address:   Option<(u8, u16)>,
    on:        bool,
    refreshes: usize,
}

/// In-memory framebuffer implementing [`Display`].
///
/// Clones share the same panel, so a test can keep a handle while the
/// renderer owns another.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    panel: Arc<Mutex<Panel>>,
}

impl MemoryDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        let blank = Frame::blank(width, height);
        Self {
            panel: Arc::new(Mutex::new(Panel {
                back:      blank.clone(),
                front:     blank,
                font:      None,
                address:   None,
                on:        false,
                refreshes: 0,
            })),
        }
    }

    fn panel(&self) -> MutexGuard<'_, Panel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The last frame made visible by `refresh`.
    pub fn snapshot(&self) -> Frame {
        self.panel().front.clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.panel().refreshes
    }

    pub fn is_on(&self) -> bool {
        self.panel().on
    }

    pub fn font(&self) -> Option<Font> {
        self.panel().font
    }

    pub fn address(&self) -> Option<(u8, u16)> {
        self.panel().address
    }
}

impl Display for MemoryDisplay {
    fn init(&mut self, bus: u8, address: u16) -> Result<()> {
        self.panel().address = Some((bus, address));
        Ok(())
    }

    fn set_font(&mut self, font: Font) {
        self.panel().font = Some(font);
    }

    fn turn_on(&mut self) -> Result<()> {
        self.panel().on = true;
        Ok(())
    }

    fn clear_screen(&mut self) {
        let mut panel = self.panel();
        panel.back.clear();
        panel.back.ops.push(DrawOp::Clear);
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str, size: f32, color: Color, layer: Layer) {
        let mut panel = self.panel();
        panel.back.texts.push(TextRun { x, y, text: text.to_string(), size });
        panel.back.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            size,
            color,
            layer,
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, layer: Layer) {
        let mut panel = self.panel();
        panel.back.fill(x, y, w, h, color == Color::White);
        panel.back.ops.push(DrawOp::Rect { x, y, w, h, color, layer });
    }

    fn refresh(&mut self) -> Result<()> {
        let mut panel = self.panel();
        panel.front = panel.back.clone();
        panel.back.ops.clear();
        panel.refreshes += 1;
        Ok(())
    }
}
