//! Source Editor - multi-line text input for the Source pane.
//!
//! Holds the SourceText and a byte-offset cursor. Every key that changes the
//! text reports [`EditOutcome::Edited`]; the app forwards those to the
//! debouncer. Cursor-only keys report [`EditOutcome::Moved`].

use unicode_width::UnicodeWidthChar;

use crate::layout::{ContentSize, TextMetrics};
use crate::overlay::{page_lines, ScrollOffset, ScrollSource, ScrollState};
use crate::renderer::FrameBuffer;
use crate::state::KeyboardEvent;
use crate::types::{ClipRect, Style};

use super::text_pane::draw_text_block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text changed.
    Edited,
    /// Only the cursor or view moved.
    Moved,
    Ignored,
}

#[derive(Debug, Default)]
pub struct SourceEditor {
    text: String,
    cursor: usize,
    scroll: ScrollState,
    viewport: (u16, u16),
}

impl SourceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor as a byte offset into [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text and put the cursor at the end.
    pub fn set_text(&mut self, text: &str, metrics: &TextMetrics) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.follow_cursor(metrics);
    }

    pub fn set_viewport(&mut self, width: u16, height: u16, metrics: &TextMetrics) {
        self.viewport = (width, height);
        self.follow_cursor(metrics);
    }

    /// Insert at the cursor. Used for typed characters and paste.
    pub fn insert_str(&mut self, s: &str, metrics: &TextMetrics) -> EditOutcome {
        if s.is_empty() {
            return EditOutcome::Ignored;
        }
        // Terminals deliver pasted line breaks as \r or \r\n
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
        self.follow_cursor(metrics);
        EditOutcome::Edited
    }

    pub fn handle_key(&mut self, event: &KeyboardEvent, metrics: &TextMetrics) -> EditOutcome {
        if !event.is_press() {
            return EditOutcome::Ignored;
        }
        if let Some(c) = event.typed_char() {
            return self.insert_str(c.encode_utf8(&mut [0; 4]), metrics);
        }
        if event.modifiers.ctrl || event.modifiers.alt {
            return EditOutcome::Ignored;
        }

        let outcome = match event.key.as_str() {
            "Enter" => return self.insert_str("\n", metrics),
            "Tab" => return self.insert_str("\t", metrics),
            "Backspace" => match self.prev_boundary() {
                Some(prev) => {
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    EditOutcome::Edited
                }
                None => EditOutcome::Ignored,
            },
            "Delete" => match self.next_boundary() {
                Some(next) => {
                    self.text.replace_range(self.cursor..next, "");
                    EditOutcome::Edited
                }
                None => EditOutcome::Ignored,
            },
            "ArrowLeft" => self.move_to(self.prev_boundary()),
            "ArrowRight" => self.move_to(self.next_boundary()),
            "ArrowUp" => self.move_lines(-1, metrics),
            "ArrowDown" => self.move_lines(1, metrics),
            "PageUp" => self.move_lines(-(page_lines(self.viewport.1) as isize), metrics),
            "PageDown" => self.move_lines(page_lines(self.viewport.1) as isize, metrics),
            "Home" => self.move_to(Some(self.line_start(self.cursor))),
            "End" => self.move_to(Some(self.line_end(self.cursor))),
            _ => EditOutcome::Ignored,
        };
        if outcome != EditOutcome::Ignored {
            self.follow_cursor(metrics);
        }
        outcome
    }

    /// Move the view without moving the cursor (mouse wheel).
    pub fn scroll_by(&mut self, delta_left: isize, delta_top: isize) -> bool {
        self.scroll.scroll_by(delta_left, delta_top)
    }

    /// Line index and display column of the cursor.
    pub fn cursor_position(&self, metrics: &TextMetrics) -> (usize, usize) {
        let start = self.line_start(self.cursor);
        let line = self.text[..start].matches('\n').count();
        let col = metrics.column_of(&self.text[start..self.cursor], self.cursor - start);
        (line, col)
    }

    pub fn draw(
        &self,
        buffer: &mut FrameBuffer,
        area: ClipRect,
        metrics: &TextMetrics,
        style: Style,
        cursor_style: Option<Style>,
    ) {
        let offset = self.scroll.offset();
        draw_text_block(buffer, area, &self.text, metrics, offset, style);

        let Some(cursor_style) = cursor_style else {
            return;
        };
        let (line, col) = self.cursor_position(metrics);
        let (Some(row), Some(col)) = (line.checked_sub(offset.top), col.checked_sub(offset.left))
        else {
            return;
        };
        if row >= area.height as usize || col >= area.width as usize {
            return;
        }
        let under = match self.text[self.cursor..].chars().next() {
            Some(c) if c.width().unwrap_or(0) > 0 => c,
            _ => ' ',
        };
        buffer.set_cell(area.x + col as u16, area.y + row as u16, under, cursor_style, &area);
    }

    // =========================================================================
    // Cursor helpers
    // =========================================================================

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..].find('\n').map_or(self.text.len(), |i| pos + i)
    }

    fn move_to(&mut self, target: Option<usize>) -> EditOutcome {
        match target {
            Some(pos) if pos != self.cursor => {
                self.cursor = pos;
                EditOutcome::Moved
            }
            _ => EditOutcome::Ignored,
        }
    }

    /// Move `delta` lines up or down, keeping the display column.
    fn move_lines(&mut self, delta: isize, metrics: &TextMetrics) -> EditOutcome {
        let (line, col) = self.cursor_position(metrics);
        let last_line = self.text.matches('\n').count();
        let target_line = line.saturating_add_signed(delta).min(last_line);
        if target_line == line {
            return EditOutcome::Ignored;
        }

        let start = self
            .text
            .split_inclusive('\n')
            .take(target_line)
            .map(str::len)
            .sum::<usize>();
        let end = self.line_end(start);
        let line_text = &self.text[start..end];

        // First char boundary whose column reaches the wanted one
        let mut pos = end;
        let mut c = 0;
        for (i, ch) in line_text.char_indices() {
            if c >= col {
                pos = start + i;
                break;
            }
            c += metrics.advance(ch, c);
        }
        self.move_to(Some(pos))
    }

    fn follow_cursor(&mut self, metrics: &TextMetrics) {
        let (w, h) = self.viewport;
        let mut content: ContentSize = metrics.measure(&self.text);
        // Room for the cursor past the last column and on a trailing empty line
        content.columns += 1;
        content.lines = content.lines.max(1);
        self.scroll.set_bounds(content, w, h);
        let (line, col) = self.cursor_position(metrics);
        self.scroll.reveal(line, col, w, h);
    }
}

impl ScrollSource for SourceEditor {
    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }
}
