//! Mouse event types.

use super::keyboard::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollInfo {
    pub direction: ScrollDirection,
    pub delta: u16,
}

impl ScrollInfo {
    /// `(columns, lines)` to move, Shift turning vertical wheel into horizontal.
    pub fn deltas(&self, step: usize, shift: bool) -> (isize, isize) {
        let amount = (self.delta as usize * step) as isize;
        match (self.direction, shift) {
            (ScrollDirection::Up, false) => (0, -amount),
            (ScrollDirection::Down, false) => (0, amount),
            (ScrollDirection::Up, true) | (ScrollDirection::Left, _) => (-amount, 0),
            (ScrollDirection::Down, true) | (ScrollDirection::Right, _) => (amount, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
    pub modifiers: Modifiers,
    /// Only set for scroll events
    pub scroll: Option<ScrollInfo>,
}

impl MouseEvent {
    pub fn click(x: u16, y: u16) -> Self {
        Self {
            action: MouseAction::Down,
            button: MouseButton::Left,
            x,
            y,
            modifiers: Modifiers::none(),
            scroll: None,
        }
    }

    pub fn wheel(x: u16, y: u16, direction: ScrollDirection) -> Self {
        Self {
            action: MouseAction::Scroll,
            button: MouseButton::None,
            x,
            y,
            modifiers: Modifiers::none(),
            scroll: Some(ScrollInfo {
                direction,
                delta: 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_deltas() {
        let down = ScrollInfo {
            direction: ScrollDirection::Down,
            delta: 1,
        };
        assert_eq!(down.deltas(3, false), (0, 3));
        assert_eq!(down.deltas(3, true), (3, 0));

        let left = ScrollInfo {
            direction: ScrollDirection::Left,
            delta: 2,
        };
        assert_eq!(left.deltas(3, false), (-6, 0));
    }
}
