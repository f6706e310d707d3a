//! Whitespace overlay.
//!
//! ```text
//! encoded_output → classify → ClassifiedGlyph[] ─┐
//! surface ScrollSource → ScrollMirror ───────────┴→ OverlayRenderer → FrameBuffer
//! ```
//!
//! The overlay never takes focus or input. It only follows the surface.

mod classify;
mod render;
mod scroll;

pub use classify::{classify, ClassifiedGlyph, GlyphCache, GlyphClass, PLACEHOLDER};
pub use render::OverlayRenderer;
pub use scroll::{
    page_lines, ScrollMirror, ScrollOffset, ScrollSource, ScrollState, LINE_SCROLL, WHEEL_SCROLL,
};
