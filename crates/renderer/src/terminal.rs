use crate::display::{Color, Display, Font, Layer};
use crate::memory::{Frame, MemoryDisplay};
use gauge_core::Result;
use std::io::Write;

/// [`Display`] that prints each refreshed frame to a terminal.
///
/// Two pixel rows share one character cell using half blocks; text runs are
/// overlaid as plain characters at their pixel column.
pub struct TerminalDisplay {
    buffer: MemoryDisplay,
    out:    Box<dyn Write + Send>,
}

impl TerminalDisplay {
    pub fn stdout(width: u32, height: u32) -> Self {
        Self::with_writer(width, height, Box::new(std::io::stdout()))
    }

    pub fn with_writer(width: u32, height: u32, out: Box<dyn Write + Send>) -> Self {
        Self {
            buffer: MemoryDisplay::new(width, height),
            out,
        }
    }
}

impl Display for TerminalDisplay {
    fn init(&mut self, bus: u8, address: u16) -> Result<()> {
        tracing::info!("Terminal display standing in for bus {bus} address {address:#04x}");
        self.buffer.init(bus, address)
    }

    fn set_font(&mut self, font: Font) {
        self.buffer.set_font(font);
    }

    fn turn_on(&mut self) -> Result<()> {
        self.buffer.turn_on()
    }

    fn clear_screen(&mut self) {
        self.buffer.clear_screen();
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str, size: f32, color: Color, layer: Layer) {
        self.buffer.draw_string(x, y, text, size, color, layer);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, layer: Layer) {
        self.buffer.fill_rect(x, y, w, h, color, layer);
    }

    fn refresh(&mut self) -> Result<()> {
        self.buffer.refresh()?;
        let art = to_text_art(&self.buffer.snapshot());
        self.out.write_all(art.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render a frame as half-block text framed by a border.
pub fn to_text_art(frame: &Frame) -> String {
    let cols = frame.width as usize;
    let rows = (frame.height as usize).div_ceil(2);

    let mut grid: Vec<Vec<char>> = (0..rows)
        .map(|row| {
            let top = row as u32 * 2;
            (0..frame.width)
                .map(|x| match (frame.pixel(x, top), frame.pixel(x, top + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect();

    for run in &frame.texts {
        if run.y < 0 || run.y as u32 >= frame.height {
            continue;
        }
        let row = &mut grid[run.y as usize / 2];
        for (i, ch) in run.text.chars().enumerate() {
            let col = run.x as i64 + i as i64;
            if (0..cols as i64).contains(&col) {
                row[col as usize] = ch;
            }
        }
    }

    let border = "─".repeat(cols);
    let mut out = String::with_capacity((cols + 4) * (rows + 2) * 3);
    out.push('┌');
    out.push_str(&border);
    out.push_str("┐\n");
    for row in grid {
        out.push('│');
        out.extend(row);
        out.push_str("│\n");
    }
    out.push('└');
    out.push_str(&border);
    out.push_str("┘\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn half_blocks_pair_rows() {
        let mut display = MemoryDisplay::new(3, 2);
        display.fill_rect(0, 0, 1, 2, Color::White, Layer::Layer0);
        display.fill_rect(1, 0, 1, 1, Color::White, Layer::Layer0);
        display.fill_rect(2, 1, 1, 1, Color::White, Layer::Layer0);
        display.refresh().unwrap();
        let art = to_text_art(&display.snapshot());
        assert_eq!(art, "┌───┐\n│█▀▄│\n└───┘\n");
    }

    #[test]
    fn text_is_overlaid_and_clipped() {
        let mut display = MemoryDisplay::new(4, 4);
        display.draw_string(2, 2, "WIND", 1.5, Color::White, Layer::Layer0);
        display.refresh().unwrap();
        let art = to_text_art(&display.snapshot());
        assert_eq!(art.lines().nth(2), Some("│  WI│"));
    }

    #[test]
    fn refresh_writes_one_frame() {
        let sink = Sink::default();
        let mut display = TerminalDisplay::with_writer(2, 2, Box::new(sink.clone()));
        display.fill_rect(0, 0, 2, 2, Color::White, Layer::Layer0);
        assert!(sink.0.lock().unwrap().is_empty());

        display.refresh().unwrap();
        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "┌──┐\n│██│\n└──┘\n");
    }
}
