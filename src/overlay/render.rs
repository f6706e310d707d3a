//! Overlay painting.
//!
//! Glyphs are placed with the same [`TextMetrics`] the underlying surface
//! uses and shifted by the mirrored scroll offset, so every tinted cell sits
//! exactly over the character it classifies.

use crate::layout::TextMetrics;
use crate::renderer::FrameBuffer;
use crate::theme::Theme;
use crate::types::ClipRect;

use super::classify::{ClassifiedGlyph, GlyphClass};
use super::scroll::ScrollOffset;

pub struct OverlayRenderer<'a> {
    metrics: TextMetrics,
    theme: &'a Theme,
}

impl<'a> OverlayRenderer<'a> {
    pub fn new(metrics: TextMetrics, theme: &'a Theme) -> Self {
        Self { metrics, theme }
    }

    /// Paint `glyphs` into `area`. Returns the number of cells written.
    pub fn draw(
        &self,
        buffer: &mut FrameBuffer,
        area: ClipRect,
        glyphs: &[ClassifiedGlyph],
        offset: ScrollOffset,
    ) -> usize {
        if area.is_empty() {
            return 0;
        }
        let height = area.height as usize;
        let width = area.width as usize;
        let mut painted = 0;

        let placed = self.metrics.place(glyphs.iter().map(|g| g.ch));
        for (glyph, p) in glyphs.iter().zip(placed) {
            let Some(row) = p.line.checked_sub(offset.top) else {
                continue;
            };
            if row >= height {
                // Lines only grow from here
                break;
            }

            let style = self.theme.glyph(glyph.class);
            // Newline is zero-width in the text; mark it with one cell.
            // Everything else owns at least one cell.
            let span = match glyph.class {
                GlyphClass::Newline => 1,
                _ => p.width.max(1),
            };

            for i in 0..span {
                let Some(col) = (p.col + i).checked_sub(offset.left) else {
                    continue;
                };
                if col >= width {
                    break;
                }
                let ch = match (glyph.class, i) {
                    (GlyphClass::Other, 0) => glyph.display_char(),
                    _ => ' ',
                };
                let x = area.x + col as u16;
                let y = area.y + row as u16;
                if buffer.set_cell(x, y, ch, style, &area) {
                    painted += 1;
                }
            }
        }
        painted
    }
}
