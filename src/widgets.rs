//! Declarative builders for view hierarchies.
//!
//! ```ignore
//! column()
//!     .layout_params(LayoutParams::match_parent())
//!     .child(button("rotateButton", "Rotate"))
//!     .child(
//!         frame()
//!             .id("starContainer")
//!             .child(image("star", star_drawable).gravity(Gravity::Center)),
//!     )
//! ```

use crate::tree::{ViewId, ViewTree};
use crate::view::{Color, Drawable, Gravity, LayoutParams, View, ViewKind};

/// A view plus the children it will be inflated with
pub struct ViewNode {
    view: View,
    children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            view: View::new(kind),
            children: Vec::new(),
        }
    }

    /// Identifier used by [`ViewTree::find_by_name`]
    pub fn id(mut self, name: impl Into<String>) -> Self {
        self.view.set_name(name);
        self
    }

    pub fn layout_params(mut self, params: LayoutParams) -> Self {
        self.view.set_layout_params(params);
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        let params = self.view.layout_params().gravity(gravity);
        self.view.set_layout_params(params);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.view.set_background(color);
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Register this node and its subtree, returning the root id.
    pub fn inflate(self, tree: &mut ViewTree) -> ViewId {
        let id = tree.register(self.view);
        for child in self.children {
            let child_id = child.inflate(tree);
            tree.add_child(id, child_id);
        }
        id
    }
}

pub fn frame() -> ViewNode {
    ViewNode::new(ViewKind::Frame)
}

pub fn column() -> ViewNode {
    ViewNode::new(ViewKind::Column)
}

pub fn row() -> ViewNode {
    ViewNode::new(ViewKind::Row)
}

pub fn button(id: &str, label: &str) -> ViewNode {
    ViewNode::new(ViewKind::Button {
        label: label.to_string(),
    })
    .id(id)
}

pub fn image(id: &str, drawable: Drawable) -> ViewNode {
    ViewNode::new(ViewKind::Image { drawable }).id(id)
}
