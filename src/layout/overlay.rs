//! Frame layout that stacks children on top of each other.
//!
//! Every child is offered the full inner space of the frame. Once the frame
//! knows its own size, each child is placed according to its gravity. Later
//! children draw on top.

use super::{Size, layout};
use crate::tree::{ViewId, ViewTree};
use crate::view::Gravity;

/// Lay out every child against `inner` and return the size of the largest.
pub fn measure_children(tree: &mut ViewTree, children: &[ViewId], inner: Size) -> Size {
    let mut max_width: f32 = 0.0;
    let mut max_height: f32 = 0.0;

    for &child in children {
        let size = layout(tree, child, inner);
        max_width = max_width.max(size.width);
        max_height = max_height.max(size.height);
    }

    Size::new(max_width, max_height)
}

/// Position already measured children inside a frame of size `frame`.
pub fn place_children(tree: &mut ViewTree, children: &[ViewId], frame: Size) {
    for &child in children {
        if let Some(view) = tree.get_mut(child) {
            let size = view.measured_size();
            let (x, y) = match view.layout_params().gravity {
                Gravity::TopStart => (0.0, 0.0),
                Gravity::Center => (
                    (frame.width - size.width) / 2.0,
                    (frame.height - size.height) / 2.0,
                ),
                Gravity::CenterHorizontal => ((frame.width - size.width) / 2.0, 0.0),
            };
            view.set_offset(x, y);
        }
    }
}
