//! Text Measurement
//!
//! Column layout for terminal text. Every surface that shows text (the
//! source editor, the plain panes, the whitespace overlay) places glyphs
//! through the same [`TextMetrics`], so a given character lands in the same
//! column everywhere.
//!
//! - Tabs advance to the next multiple of the tab width
//! - Newlines end the line and take no columns
//! - Everything else uses its Unicode display width (CJK and emoji are 2),
//!   but never less than one cell, so control chars and combining marks
//!   still own a column the overlay can mark

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells. Control chars count as 0.
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Truncate text to `width` cells, ending in an ellipsis if cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    // Leave room for the ellipsis
    let target = width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = c.width().unwrap_or(0) as u16;
        if used + w > target {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}

/// A character with its computed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub line: usize,
    pub col: usize,
    /// Columns taken. Zero only for newline.
    pub width: usize,
    pub ch: char,
}

/// Total extent of laid-out text, in lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSize {
    pub lines: usize,
    pub columns: usize,
}

/// Shared character-width and tab-stop rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    tab_width: u16,
}

impl TextMetrics {
    pub fn new(tab_width: u16) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> u16 {
        self.tab_width
    }

    /// Columns `ch` takes when it starts at `col`.
    pub fn advance(&self, ch: char, col: usize) -> usize {
        match ch {
            '\n' => 0,
            '\t' => {
                let tab = self.tab_width as usize;
                tab - col % tab
            }
            c => c.width().unwrap_or(0).max(1),
        }
    }

    /// Position every character of `chars`.
    pub fn place<I>(&self, chars: I) -> impl Iterator<Item = Placed>
    where
        I: IntoIterator<Item = char>,
    {
        let metrics = *self;
        let mut line = 0usize;
        let mut col = 0usize;
        chars.into_iter().map(move |ch| {
            let width = metrics.advance(ch, col);
            let placed = Placed {
                line,
                col,
                width,
                ch,
            };
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += width;
            }
            placed
        })
    }

    /// Lines and widest line of `text`. Empty text is zero lines.
    ///
    /// A line ending in `\n` counts one extra column for the newline
    /// marker the overlay paints there.
    pub fn measure(&self, text: &str) -> ContentSize {
        if text.is_empty() {
            return ContentSize::default();
        }
        let mut size = ContentSize { lines: 1, columns: 0 };
        for p in self.place(text.chars()) {
            if p.ch == '\n' {
                size.lines = p.line + 2;
                size.columns = size.columns.max(p.col + 1);
            } else {
                size.columns = size.columns.max(p.col + p.width);
            }
        }
        size
    }

    /// Display column of the char at byte offset `byte` within its line.
    pub fn column_of(&self, line_text: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, ch) in line_text.char_indices() {
            if idx >= byte {
                break;
            }
            col += self.advance(ch, col);
        }
        col
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TAB_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("世界"), 4);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 6), "hello…");
        assert_eq!(truncate_text("hello", 4), "hel…");
        assert_eq!(truncate_text("", 5), "");
    }

    #[test]
    fn test_tab_advances_to_stop() {
        let m = TextMetrics::new(4);
        assert_eq!(m.advance('\t', 0), 4);
        assert_eq!(m.advance('\t', 1), 3);
        assert_eq!(m.advance('\t', 4), 4);
        assert_eq!(m.advance('a', 3), 1);
        assert_eq!(m.advance('\n', 7), 0);
    }

    #[test]
    fn test_zero_width_chars_take_a_cell() {
        let m = TextMetrics::new(4);
        assert_eq!(m.advance('\r', 0), 1);
        assert_eq!(m.advance('\0', 2), 1);
        assert_eq!(m.advance('\u{301}', 1), 1);
        assert_eq!(m.advance('世', 0), 2);

        let cols: Vec<_> = m.place("a\u{301}b".chars()).map(|p| p.col).collect();
        assert_eq!(cols, vec![0, 1, 2]);
        assert_eq!(m.column_of("\rx", 1), 1);
    }

    #[test]
    fn test_place_positions() {
        let m = TextMetrics::new(4);
        let placed: Vec<_> = m.place("a\tb\n c".chars()).collect();
        let coords: Vec<_> = placed.iter().map(|p| (p.line, p.col, p.ch)).collect();
        assert_eq!(
            coords,
            vec![(0, 0, 'a'), (0, 1, '\t'), (0, 4, 'b'), (0, 5, '\n'), (1, 0, ' '), (1, 1, 'c')]
        );
        assert_eq!(placed[1].width, 3);
    }

    #[test]
    fn test_measure() {
        let m = TextMetrics::new(4);
        assert_eq!(m.measure(""), ContentSize::default());
        assert_eq!(m.measure("abc"), ContentSize { lines: 1, columns: 3 });
        assert_eq!(m.measure("a\n\tbc"), ContentSize { lines: 2, columns: 6 });
        // Trailing newline opens an empty last line
        assert_eq!(m.measure("ab\n"), ContentSize { lines: 2, columns: 3 });
    }

    #[test]
    fn test_measure_counts_newline_marker() {
        let m = TextMetrics::new(4);
        // Longest line ends in a newline: its marker is the last column
        assert_eq!(m.measure("abcd\nx"), ContentSize { lines: 2, columns: 5 });
        assert_eq!(m.measure("\t\n"), ContentSize { lines: 2, columns: 5 });
        // A longer unterminated line still wins
        assert_eq!(m.measure("a\nxyz"), ContentSize { lines: 2, columns: 3 });
    }

    #[test]
    fn test_column_of() {
        let m = TextMetrics::new(4);
        assert_eq!(m.column_of("\tab", 0), 0);
        assert_eq!(m.column_of("\tab", 1), 4);
        assert_eq!(m.column_of("\tab", 2), 5);
        assert_eq!(m.column_of("世a", 3), 2);
    }
}
