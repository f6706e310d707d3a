//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. Panes, the overlay and the button bar all draw
//! into it; the [`DiffRenderer`](super::DiffRenderer) turns it into output.

use unicode_width::UnicodeWidthChar;

use crate::types::{Cell, ClipRect, Style};

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = width as usize * height as usize;
        self.cells.resize(size, Cell::default());
        self.clear();
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell, honoring the clip rect.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style, clip: &ClipRect) -> bool {
        if !self.in_bounds(x, y) || !clip.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = Cell::styled(ch, style);
        true
    }

    /// Fill a rectangle with one character and style.
    pub fn fill_rect(&mut self, rect: &ClipRect, ch: char, style: Style) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let idx = self.index(x, y);
                self.cells[idx] = Cell::styled(ch, style);
            }
        }
    }

    /// Draw a single-line string starting at (x, y), clipped.
    ///
    /// Wide characters take two cells; the second holds a continuation
    /// marker (char 0). Returns the column after the last drawn character.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style, clip: &ClipRect) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            self.set_cell(col, y, ch, style, clip);
            if w == 2 && self.in_bounds(col + 1, y) && clip.contains(col + 1, y) {
                let idx = self.index(col + 1, y);
                self.cells[idx] = Cell {
                    char: 0,
                    ..Cell::styled(' ', style)
                };
            }
            col = col.saturating_add(w);
        }
        col
    }

    /// Draw a single-line box border around `rect`.
    pub fn draw_border(&mut self, rect: &ClipRect, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let clip = self.bounds();
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;

        for x in rect.x + 1..right {
            self.set_cell(x, rect.y, '─', style, &clip);
            self.set_cell(x, bottom, '─', style, &clip);
        }
        for y in rect.y + 1..bottom {
            self.set_cell(rect.x, y, '│', style, &clip);
            self.set_cell(right, y, '│', style, &clip);
        }
        self.set_cell(rect.x, rect.y, '┌', style, &clip);
        self.set_cell(right, rect.y, '┐', style, &clip);
        self.set_cell(rect.x, bottom, '└', style, &clip);
        self.set_cell(right, bottom, '┘', style, &clip);
    }

    /// Text of one row, continuation cells skipped. Used by tests and
    /// snapshot comparisons.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| c.char != 0)
            .filter_map(|c| c.ch())
            .collect()
    }
}
