//! Linear layout: children stacked along one axis in insertion order.
//!
//! Each child is offered whatever is left along the main axis and the full
//! cross axis. A `MatchParent` child therefore takes all remaining space.

use super::{Size, layout};
use crate::tree::{ViewId, ViewTree};

/// Lay out and place `children`, returning the total content size.
pub fn layout_children(
    tree: &mut ViewTree,
    children: &[ViewId],
    inner: Size,
    vertical: bool,
) -> Size {
    let mut main: f32 = 0.0;
    let mut cross: f32 = 0.0;

    for &child in children {
        let offered = if vertical {
            Size::new(inner.width, (inner.height - main).max(0.0))
        } else {
            Size::new((inner.width - main).max(0.0), inner.height)
        };
        let size = layout(tree, child, offered);

        if let Some(view) = tree.get_mut(child) {
            if vertical {
                view.set_offset(0.0, main);
            } else {
                view.set_offset(main, 0.0);
            }
        }

        if vertical {
            main += size.height;
            cross = cross.max(size.width);
        } else {
            main += size.width;
            cross = cross.max(size.height);
        }
    }

    if vertical {
        Size::new(cross, main)
    } else {
        Size::new(main, cross)
    }
}
