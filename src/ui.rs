//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to
//! the visible area.
//!
//! Menus compute their own rectangles from pointer coordinates, which can
//! drift partially outside the terminal buffer near the edges. Writing
//! out-of-bounds into the underlying `Buffer` can panic, so all menu
//! rendering routes through this wrapper and gets clipped instead of
//! guarded at every call site.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct directly from an area and buffer; used by tests that render
    /// into an offscreen buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Render `widget` into `area`, clipped to the visible region. A fully
    /// off-screen rectangle is a no-op.
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        let clipped = area.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            return;
        }
        widget.render(clipped, self.buffer);
    }
}
