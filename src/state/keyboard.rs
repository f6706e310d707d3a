//! Keyboard event types.
//!
//! Keys are named the way the rest of the app matches on them: `"a"`,
//! `"Enter"`, `"ArrowUp"`, `"F2"`.

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::default())
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press or auto-repeat. Releases are ignored by every handler.
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    /// The typed character, if this is a single printable key without Ctrl/Alt.
    pub fn typed_char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// True for Ctrl+`letter`, case-insensitive.
    pub fn is_ctrl(&self, letter: char) -> bool {
        self.modifiers.ctrl && self.key.eq_ignore_ascii_case(letter.encode_utf8(&mut [0; 4]))
    }
}
