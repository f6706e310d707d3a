//! Button - a one-line clickable label.

use crate::layout::ButtonId;
use crate::renderer::FrameBuffer;
use crate::types::{ClipRect, Style};

/// Draw `[ Label ]` into `rect`.
pub fn draw_button(buffer: &mut FrameBuffer, rect: ClipRect, id: ButtonId, style: Style) {
    if rect.is_empty() {
        return;
    }
    buffer.fill_rect(&rect, ' ', style);
    let label = format!("[ {} ]", id.label());
    buffer.draw_text(rect.x, rect.y, &label, style, &rect);
}
