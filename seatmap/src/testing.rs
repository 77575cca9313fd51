//! Render helpers for component tests
//!
//! ```ignore
//! let mut render = RenderHarness::new(60, 24);
//! let output = render.render_to_string_plain(|frame| {
//!     component.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("No seats selected"));
//! ```

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};

/// Renders into an in-memory terminal of a fixed size
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend terminal");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(draw).expect("draw to test backend");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text without styling, one line per row
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Text of a buffer, trailing spaces removed from each row
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Text of part of a buffer
pub fn buffer_rect_to_string_plain(buffer: &Buffer, rect: Rect) -> String {
    let rect = rect.intersection(buffer.area);
    (rect.top()..rect.bottom())
        .map(|y| {
            let row: String = (rect.left()..rect.right())
                .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()))
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
