//! Screen layout: four text columns over a one-line button bar.
//!
//! ```text
//! ┌Source──┐┌AST─────┐┌Debug───┐┌Whitespace┐
//! │        ││        ││        ││          │
//! └────────┘└────────┘└────────┘└──────────┘
//! [ Copy ] [ Download ] status...
//! ```
//!
//! Geometry comes from a small taffy flexbox tree rebuilt on every resize.

use taffy::{
    AvailableSpace, Dimension, FlexDirection, LengthPercentage, NodeId, Size, Style, TaffyTree,
};

use crate::error::{LensError, LensResult};
use crate::types::ClipRect;

use super::text_measure::string_width;

/// The four text columns, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Source,
    Ast,
    Debug,
    Whitespace,
}

impl PaneId {
    pub const ALL: [PaneId; 4] = [PaneId::Source, PaneId::Ast, PaneId::Debug, PaneId::Whitespace];

    pub fn title(self) -> &'static str {
        match self {
            PaneId::Source => "Source",
            PaneId::Ast => "AST",
            PaneId::Debug => "Debug",
            PaneId::Whitespace => "Whitespace",
        }
    }

    fn index(self) -> usize {
        match self {
            PaneId::Source => 0,
            PaneId::Ast => 1,
            PaneId::Debug => 2,
            PaneId::Whitespace => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Copy,
    Download,
}

impl ButtonId {
    pub const ALL: [ButtonId; 2] = [ButtonId::Copy, ButtonId::Download];

    pub fn label(self) -> &'static str {
        match self {
            ButtonId::Copy => "Copy",
            ButtonId::Download => "Download",
        }
    }

    /// Rendered width including brackets and padding: `[ Copy ]`.
    pub fn width(self) -> u16 {
        string_width(self.label()) + 4
    }
}

/// Absolute rectangles for every region of the screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaneLayout {
    panes: [ClipRect; 4],
    buttons: [ClipRect; 2],
    status: ClipRect,
}

impl PaneLayout {
    /// Lay out a `width` x `height` screen.
    pub fn compute(width: u16, height: u16) -> LensResult<Self> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        let err = |e: taffy::TaffyError| LensError::layout(e.to_string());

        let column = Style {
            flex_grow: 1.0,
            flex_basis: Dimension::Length(0.0),
            ..Default::default()
        };
        let pane_nodes = PaneId::ALL
            .iter()
            .map(|_| tree.new_leaf(column.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(err)?;
        let body = tree
            .new_with_children(
                Style {
                    flex_direction: FlexDirection::Row,
                    flex_grow: 1.0,
                    flex_basis: Dimension::Length(0.0),
                    ..Default::default()
                },
                &pane_nodes,
            )
            .map_err(err)?;

        let button_nodes = ButtonId::ALL
            .iter()
            .map(|id| {
                tree.new_leaf(Style {
                    size: Size {
                        width: Dimension::Length(id.width() as f32),
                        height: Dimension::Length(1.0),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(err)?;
        let status = tree
            .new_leaf(Style {
                flex_grow: 1.0,
                size: Size {
                    width: Dimension::Auto,
                    height: Dimension::Length(1.0),
                },
                ..Default::default()
            })
            .map_err(err)?;
        let bar = tree
            .new_with_children(
                Style {
                    flex_direction: FlexDirection::Row,
                    flex_shrink: 0.0,
                    gap: Size {
                        width: LengthPercentage::Length(1.0),
                        height: LengthPercentage::Length(0.0),
                    },
                    size: Size {
                        width: Dimension::Percent(1.0),
                        height: Dimension::Length(1.0),
                    },
                    ..Default::default()
                },
                &[button_nodes[0], button_nodes[1], status],
            )
            .map_err(err)?;

        let root = tree
            .new_with_children(
                Style {
                    flex_direction: FlexDirection::Column,
                    size: Size {
                        width: Dimension::Length(width as f32),
                        height: Dimension::Length(height as f32),
                    },
                    ..Default::default()
                },
                &[body, bar],
            )
            .map_err(err)?;

        let available = Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::Definite(height as f32),
        };
        tree.compute_layout(root, available).map_err(err)?;

        // Taffy locations are parent-relative
        let body_origin = origin(&tree, body, (0.0, 0.0))?;
        let bar_origin = origin(&tree, bar, (0.0, 0.0))?;

        let mut layout = PaneLayout::default();
        for (slot, &node) in layout.panes.iter_mut().zip(&pane_nodes) {
            *slot = rect(&tree, node, body_origin)?;
        }
        for (slot, &node) in layout.buttons.iter_mut().zip(&button_nodes) {
            *slot = rect(&tree, node, bar_origin)?;
        }
        layout.status = rect(&tree, status, bar_origin)?;
        Ok(layout)
    }

    /// Outer rectangle of a pane, border included.
    pub fn pane(&self, id: PaneId) -> ClipRect {
        self.panes[id.index()]
    }

    /// Text area of a pane (inside the border).
    pub fn pane_inner(&self, id: PaneId) -> ClipRect {
        self.pane(id).inset(1)
    }

    pub fn button(&self, id: ButtonId) -> ClipRect {
        match id {
            ButtonId::Copy => self.buttons[0],
            ButtonId::Download => self.buttons[1],
        }
    }

    pub fn status(&self) -> ClipRect {
        self.status
    }

    /// Pane under a screen position.
    pub fn pane_at(&self, x: u16, y: u16) -> Option<PaneId> {
        PaneId::ALL.into_iter().find(|id| self.pane(*id).contains(x, y))
    }

    /// Button under a screen position.
    pub fn button_at(&self, x: u16, y: u16) -> Option<ButtonId> {
        ButtonId::ALL.into_iter().find(|id| self.button(*id).contains(x, y))
    }
}

fn origin(tree: &TaffyTree<()>, node: NodeId, parent: (f32, f32)) -> LensResult<(f32, f32)> {
    let layout = tree
        .layout(node)
        .map_err(|e| LensError::layout(e.to_string()))?;
    Ok((parent.0 + layout.location.x, parent.1 + layout.location.y))
}

fn rect(tree: &TaffyTree<()>, node: NodeId, parent: (f32, f32)) -> LensResult<ClipRect> {
    let layout = tree
        .layout(node)
        .map_err(|e| LensError::layout(e.to_string()))?;
    let x = parent.0 + layout.location.x;
    let y = parent.1 + layout.location.y;
    Ok(ClipRect::new(
        x.round().max(0.0) as u16,
        y.round().max(0.0) as u16,
        layout.size.width.round().max(0.0) as u16,
        layout.size.height.round().max(0.0) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_equal_columns() {
        let layout = PaneLayout::compute(80, 24).unwrap();
        for id in PaneId::ALL {
            let r = layout.pane(id);
            assert_eq!(r.width, 20, "{id:?}");
            assert_eq!(r.height, 23, "{id:?}");
            assert_eq!(r.y, 0);
        }
        assert_eq!(layout.pane(PaneId::Source).x, 0);
        assert_eq!(layout.pane(PaneId::Whitespace).x, 60);
    }

    #[test]
    fn test_button_bar_on_last_row() {
        let layout = PaneLayout::compute(80, 24).unwrap();
        let copy = layout.button(ButtonId::Copy);
        let download = layout.button(ButtonId::Download);
        assert_eq!(copy.y, 23);
        assert_eq!(copy.width, ButtonId::Copy.width());
        assert_eq!(download.x, copy.x + copy.width + 1);
        assert_eq!(layout.status().y, 23);
        assert!(layout.status().x > download.x);
    }

    #[test]
    fn test_hit_testing() {
        let layout = PaneLayout::compute(80, 24).unwrap();
        assert_eq!(layout.pane_at(5, 5), Some(PaneId::Source));
        assert_eq!(layout.pane_at(65, 5), Some(PaneId::Whitespace));
        assert_eq!(layout.pane_at(5, 23), None);
        assert_eq!(layout.button_at(1, 23), Some(ButtonId::Copy));
        assert_eq!(layout.button_at(1, 5), None);
    }

    #[test]
    fn test_inner_excludes_border() {
        let layout = PaneLayout::compute(80, 24).unwrap();
        let outer = layout.pane(PaneId::Ast);
        let inner = layout.pane_inner(PaneId::Ast);
        assert_eq!(inner.x, outer.x + 1);
        assert_eq!(inner.width, outer.width - 2);
    }

    #[test]
    fn test_tiny_terminal_does_not_fail() {
        assert!(PaneLayout::compute(1, 1).is_ok());
        assert!(PaneLayout::compute(0, 0).is_ok());
    }
}
