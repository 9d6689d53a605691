//! Measure-and-place layout pass over the [`ViewTree`].
//!
//! Each view is laid out against the space its parent offers. Containers
//! size their children first, resolve their own size from their
//! [`LayoutParams`](crate::view::LayoutParams), then place the children:
//!
//! - [`overlay`]: frame containers stack children by gravity
//! - [`linear`]: columns and rows stack children along one axis

pub mod linear;
pub mod overlay;

use crate::tree::{ViewId, ViewTree};
use crate::view::{Dimension, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Clone, Copy)]
enum ContainerKind {
    Frame,
    Column,
    Row,
}

/// Lay out `id` and its subtree against `available` and return its size.
pub fn layout(tree: &mut ViewTree, id: ViewId, available: Size) -> Size {
    let Some(view) = tree.get(id) else {
        return Size::zero();
    };
    let params = view.layout_params();
    let container = match view.kind() {
        ViewKind::Frame => Some(ContainerKind::Frame),
        ViewKind::Column => Some(ContainerKind::Column),
        ViewKind::Row => Some(ContainerKind::Row),
        ViewKind::Button { .. } | ViewKind::Image { .. } => None,
    };

    let size = match container {
        None => tree
            .get_mut(id)
            .map(|view| view.measure(available))
            .unwrap_or_default(),
        Some(kind) => {
            let inner = Size::new(
                space_for_children(params.width, available.width),
                space_for_children(params.height, available.height),
            );
            let children = tree.children(id);
            let content = match kind {
                ContainerKind::Frame => overlay::measure_children(tree, &children, inner),
                ContainerKind::Column => linear::layout_children(tree, &children, inner, true),
                ContainerKind::Row => linear::layout_children(tree, &children, inner, false),
            };
            let size = match tree.get_mut(id) {
                Some(view) => {
                    view.set_content(content);
                    view.measure(available)
                }
                None => return Size::zero(),
            };
            if let ContainerKind::Frame = kind {
                overlay::place_children(tree, &children, size);
            }
            size
        }
    };

    tree.clear_dirty(id);
    size
}

/// Re-run layout for every queued layout root, each against the space it was
/// offered last time. Returns the number of subtrees laid out.
pub fn layout_pending(tree: &mut ViewTree) -> usize {
    let roots = tree.take_layout_roots();
    for &root in &roots {
        let available = tree.get(root).map(|view| view.available());
        if let Some(available) = available {
            layout(tree, root, available);
        }
    }
    if !roots.is_empty() {
        log::trace!("Laid out {} subtree(s)", roots.len());
    }
    roots.len()
}

fn space_for_children(dimension: Dimension, available: f32) -> f32 {
    match dimension {
        Dimension::Exact(px) => px.max(0) as f32,
        Dimension::MatchParent | Dimension::WrapContent => available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Drawable, Gravity, LayoutParams, View};

    fn container(kind: ViewKind, params: LayoutParams) -> View {
        let mut view = View::new(kind);
        view.set_layout_params(params);
        view
    }

    fn star(params: LayoutParams) -> View {
        let mut view = View::new(ViewKind::Image {
            drawable: Drawable {
                name: "ic_star",
                size: Size::new(96.0, 96.0),
            },
        });
        view.set_layout_params(params);
        view
    }

    #[test]
    fn test_column_stacks_and_frame_centers() {
        let mut tree = ViewTree::new();
        let root = tree.register(container(ViewKind::Column, LayoutParams::match_parent()));
        let header = tree.register(star(LayoutParams::new(
            Dimension::MatchParent,
            Dimension::Exact(100),
        )));
        let frame = tree.register(container(ViewKind::Frame, LayoutParams::match_parent()));
        let centered = tree.register(star(LayoutParams::wrap_content().gravity(Gravity::Center)));
        tree.add_child(root, header);
        tree.add_child(root, frame);
        tree.add_child(frame, centered);

        let size = layout(&mut tree, root, Size::new(400.0, 600.0));

        assert_eq!(size, Size::new(400.0, 600.0));
        let frame_view = tree.get(frame).unwrap();
        assert_eq!(frame_view.offset(), (0.0, 100.0));
        assert_eq!(frame_view.measured_size(), Size::new(400.0, 500.0));
        assert_eq!(tree.get(centered).unwrap().offset(), (152.0, 202.0));
        assert_eq!(tree.absolute_offset(centered), Some((152.0, 302.0)));
    }

    #[test]
    fn test_wrap_content_row_sizes_to_children() {
        let mut tree = ViewTree::new();
        let row = tree.register(container(ViewKind::Row, LayoutParams::wrap_content()));
        for _ in 0..3 {
            let child = tree.register(star(LayoutParams::wrap_content()));
            tree.add_child(row, child);
        }

        let size = layout(&mut tree, row, Size::new(1000.0, 1000.0));

        assert_eq!(size, Size::new(288.0, 96.0));
        let offsets: Vec<_> = tree
            .children(row)
            .into_iter()
            .map(|c| tree.get(c).unwrap().offset().0)
            .collect();
        assert_eq!(offsets, vec![0.0, 96.0, 192.0]);
    }

    #[test]
    fn test_layout_pending_recenters_resized_child() {
        let mut tree = ViewTree::new();
        let frame = tree.register(container(ViewKind::Frame, LayoutParams::match_parent()));
        let child = tree.register(star(LayoutParams::wrap_content().gravity(Gravity::Center)));
        tree.add_child(frame, child);
        layout(&mut tree, frame, Size::new(400.0, 400.0));
        tree.take_layout_roots();

        let params = LayoutParams::new(Dimension::WrapContent, Dimension::Exact(196))
            .gravity(Gravity::Center);
        tree.get_mut(child).unwrap().set_layout_params(params);
        tree.collect_changes();

        assert_eq!(layout_pending(&mut tree), 1);
        assert_eq!(tree.get(child).unwrap().offset(), (152.0, 102.0));
        assert!(!tree.is_dirty(frame));
    }
}
