//! Scroll state and one-way scroll mirroring.
//!
//! A [`ScrollState`] belongs to a text surface and is the only thing that
//! moves it. A [`ScrollMirror`] copies a [`ScrollSource`]'s offset on every
//! scroll event and has no way to write back.

use crate::layout::ContentSize;

/// Lines moved by arrow keys.
pub const LINE_SCROLL: usize = 1;

/// Lines moved per mouse wheel notch.
pub const WHEEL_SCROLL: usize = 3;

/// Page Up/Down moves this share of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

/// Scroll position in lines (`top`) and columns (`left`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub top: usize,
    pub left: usize,
}

impl ScrollOffset {
    pub const fn new(top: usize, left: usize) -> Self {
        Self { top, left }
    }
}

/// Anything with a readable scroll position.
pub trait ScrollSource {
    fn scroll_offset(&self) -> ScrollOffset;
}

/// Read-only copy of another surface's scroll position.
#[derive(Debug, Clone, Default)]
pub struct ScrollMirror {
    offset: ScrollOffset,
}

impl ScrollMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the source's current offset.
    pub fn on_scroll(&mut self, source: &dyn ScrollSource) {
        self.offset = source.scroll_offset();
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }
}

/// Offset plus bounds for a scrollable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: ScrollOffset,
    max: ScrollOffset,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn max(&self) -> ScrollOffset {
        self.max
    }

    /// Recompute limits from content and viewport size, re-clamping the
    /// current offset.
    pub fn set_bounds(&mut self, content: ContentSize, viewport_width: u16, viewport_height: u16) {
        self.max = ScrollOffset {
            top: content.lines.saturating_sub(viewport_height as usize),
            left: content.columns.saturating_sub(viewport_width as usize),
        };
        self.offset.top = self.offset.top.min(self.max.top);
        self.offset.left = self.offset.left.min(self.max.left);
    }

    /// Set the offset, clamped to the valid range.
    pub fn set_offset(&mut self, top: usize, left: usize) {
        self.offset = ScrollOffset {
            top: top.min(self.max.top),
            left: left.min(self.max.left),
        };
    }

    /// Scroll by a delta.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&mut self, delta_left: isize, delta_top: isize) -> bool {
        let before = self.offset;
        let top = before.top.saturating_add_signed(delta_top);
        let left = before.left.saturating_add_signed(delta_left);
        self.set_offset(top, left);
        self.offset != before
    }

    pub fn scroll_to_top(&mut self) {
        self.set_offset(0, self.offset.left);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set_offset(self.max.top, self.offset.left);
    }

    /// Adjust the offset just enough to bring `(line, col)` into view.
    pub fn reveal(&mut self, line: usize, col: usize, viewport_width: u16, viewport_height: u16) {
        let h = (viewport_height as usize).max(1);
        let w = (viewport_width as usize).max(1);
        let mut top = self.offset.top;
        let mut left = self.offset.left;
        if line < top {
            top = line;
        } else if line >= top + h {
            top = line + 1 - h;
        }
        if col < left {
            left = col;
        } else if col >= left + w {
            left = col + 1 - w;
        }
        self.offset = ScrollOffset { top, left };
    }
}

/// Lines moved by one Page Up/Down in a viewport of `height` lines.
pub fn page_lines(height: u16) -> usize {
    ((height as f32 * PAGE_SCROLL_FACTOR) as usize).max(1)
}
