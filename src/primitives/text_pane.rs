//! Text Pane - read-only, scrollable text surface.
//!
//! Used for the AST, Debug and Whitespace columns. The pane owns its
//! [`ScrollState`] and exposes it as a [`ScrollSource`] so an overlay can
//! follow it.

use unicode_width::UnicodeWidthChar;

use crate::layout::{ContentSize, TextMetrics};
use crate::overlay::{page_lines, ScrollOffset, ScrollSource, ScrollState, LINE_SCROLL};
use crate::renderer::FrameBuffer;
use crate::state::KeyboardEvent;
use crate::types::{ClipRect, Style};

/// Draw `text` into `area`, shifted by `offset`.
///
/// Tabs become blank cells up to the next stop, so every surface that goes
/// through here places characters in the same columns as the overlay.
pub fn draw_text_block(
    buffer: &mut FrameBuffer,
    area: ClipRect,
    text: &str,
    metrics: &TextMetrics,
    offset: ScrollOffset,
    style: Style,
) {
    if area.is_empty() {
        return;
    }
    let height = area.height as usize;
    let width = area.width as usize;

    for p in metrics.place(text.chars()) {
        let Some(row) = p.line.checked_sub(offset.top) else {
            continue;
        };
        if row >= height {
            break;
        }
        if p.ch == '\n' {
            continue;
        }
        let Some(col) = p.col.checked_sub(offset.left) else {
            continue;
        };
        if col >= width {
            continue;
        }
        let x = area.x + col as u16;
        let y = area.y + row as u16;
        if p.ch == '\t' {
            let span = p.width.min(width - col) as u16;
            buffer.fill_rect(&ClipRect::new(x, y, span, 1), ' ', style);
        } else if p.ch.width().unwrap_or(0) == 0 {
            // Control chars and lone combining marks keep their cell blank
            buffer.set_cell(x, y, ' ', style, &area);
        } else {
            buffer.draw_text(x, y, p.ch.encode_utf8(&mut [0; 4]), style, &area);
        }
    }
}

#[derive(Debug, Default)]
pub struct TextPane {
    text: String,
    content: ContentSize,
    scroll: ScrollState,
    viewport: (u16, u16),
}

impl TextPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content, keeping the scroll position where it still fits.
    pub fn set_text(&mut self, text: &str, metrics: &TextMetrics) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.content = metrics.measure(text);
        self.update_bounds();
    }

    /// Size of the text area, border excluded.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.update_bounds();
    }

    fn update_bounds(&mut self) {
        let (w, h) = self.viewport;
        self.scroll.set_bounds(self.content, w, h);
    }

    pub fn content_size(&self) -> ContentSize {
        self.content
    }

    /// Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta_left: isize, delta_top: isize) -> bool {
        self.scroll.scroll_by(delta_left, delta_top)
    }

    pub fn scroll_to(&mut self, top: usize, left: usize) -> bool {
        let before = self.scroll.offset();
        self.scroll.set_offset(top, left);
        self.scroll.offset() != before
    }

    /// Scroll keys. Returns `true` if the offset changed.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let line = LINE_SCROLL as isize;
        let page = page_lines(self.viewport.1) as isize;
        match event.key.as_str() {
            "ArrowUp" => self.scroll_by(0, -line),
            "ArrowDown" => self.scroll_by(0, line),
            "ArrowLeft" => self.scroll_by(-line, 0),
            "ArrowRight" => self.scroll_by(line, 0),
            "PageUp" => self.scroll_by(0, -page),
            "PageDown" => self.scroll_by(0, page),
            "Home" => {
                let left = self.scroll.offset().left;
                self.scroll_to(0, left)
            }
            "End" => {
                let before = self.scroll.offset();
                self.scroll.scroll_to_bottom();
                self.scroll.offset() != before
            }
            _ => false,
        }
    }

    pub fn draw(&self, buffer: &mut FrameBuffer, area: ClipRect, metrics: &TextMetrics, style: Style) {
        draw_text_block(buffer, area, &self.text, metrics, self.scroll.offset(), style);
    }
}

impl ScrollSource for TextPane {
    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }
}
