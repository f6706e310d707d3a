//! Glyph classification for the whitespace overlay.
//!
//! Each character of the encoded output maps on its own to one
//! [`GlyphClass`]. Order is kept and runs are never merged.

use std::rc::Rc;

use tracing::trace;

use crate::pipeline::OutputState;

/// Shown for any character that is not space, tab or newline.
pub const PLACEHOLDER: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphClass {
    Space,
    Newline,
    Tab,
    Other,
}

impl GlyphClass {
    pub fn of(ch: char) -> Self {
        match ch {
            ' ' => GlyphClass::Space,
            '\n' => GlyphClass::Newline,
            '\t' => GlyphClass::Tab,
            _ => GlyphClass::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedGlyph {
    pub class: GlyphClass,
    pub ch: char,
}

impl ClassifiedGlyph {
    pub fn new(ch: char) -> Self {
        Self {
            class: GlyphClass::of(ch),
            ch,
        }
    }

    /// Character actually drawn: the literal for whitespace, `?` otherwise.
    pub fn display_char(&self) -> char {
        match self.class {
            GlyphClass::Other => PLACEHOLDER,
            _ => self.ch,
        }
    }
}

pub fn classify(encoded: &str) -> Vec<ClassifiedGlyph> {
    encoded.chars().map(ClassifiedGlyph::new).collect()
}

/// Classified glyphs of the current output, recomputed only when the
/// output snapshot is replaced.
#[derive(Debug, Default)]
pub struct GlyphCache {
    generation: Option<u64>,
    glyphs: Rc<Vec<ClassifiedGlyph>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catch up with `state`. Returns `true` if the glyphs were rebuilt.
    pub fn refresh(&mut self, state: &OutputState) -> bool {
        let generation = state.generation();
        if self.generation == Some(generation) {
            return false;
        }
        let snapshot = state.current();
        self.glyphs = Rc::new(classify(&snapshot.encoded_output));
        self.generation = Some(generation);
        trace!(generation, glyphs = self.glyphs.len(), "glyphs reclassified");
        true
    }

    pub fn glyphs(&self) -> Rc<Vec<ClassifiedGlyph>> {
        self.glyphs.clone()
    }
}
