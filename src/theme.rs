//! Colors for every drawn element.
//!
//! The default uses ANSI palette indices so the UI follows the user's
//! terminal color scheme.

use crate::overlay::GlyphClass;
use crate::types::{Attr, Rgba, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub text: Style,
    pub text_muted: Style,
    pub border: Style,
    pub border_focus: Style,
    pub title: Style,
    pub cursor: Style,
    pub button: Style,
    pub status_ok: Style,
    pub status_error: Style,

    // Whitespace overlay tints, one per glyph class
    pub glyph_space: Style,
    pub glyph_tab: Style,
    pub glyph_newline: Style,
    pub glyph_other: Style,
}

impl Theme {
    /// ANSI-only theme.
    pub fn terminal() -> Self {
        let default = Rgba::TERMINAL_DEFAULT;
        Self {
            text: Style::default(),
            text_muted: Style::new(Rgba::ansi(8), default),
            border: Style::new(Rgba::ansi(7), default),
            border_focus: Style::new(Rgba::ansi(12), default),
            title: Style::new(Rgba::ansi(15), default).with_attrs(Attr::BOLD),
            cursor: Style::default().with_attrs(Attr::INVERSE),
            button: Style::new(Rgba::ansi(0), Rgba::ansi(12)).with_attrs(Attr::BOLD),
            status_ok: Style::new(Rgba::ansi(2), default),
            status_error: Style::new(Rgba::ansi(1), default),

            glyph_space: Style::new(default, Rgba::ansi(24)),
            glyph_tab: Style::new(default, Rgba::ansi(94)),
            glyph_newline: Style::new(Rgba::ansi(8), Rgba::ansi(236)),
            glyph_other: Style::new(Rgba::ansi(15), Rgba::ansi(1)).with_attrs(Attr::BOLD),
        }
    }

    /// Tint for one overlay glyph class.
    pub fn glyph(&self, class: GlyphClass) -> Style {
        match class {
            GlyphClass::Space => self.glyph_space,
            GlyphClass::Tab => self.glyph_tab,
            GlyphClass::Newline => self.glyph_newline,
            GlyphClass::Other => self.glyph_other,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal()
    }
}
