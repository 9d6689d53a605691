//! Arena-based view storage.
//!
//! The tree stores every view in a dense `Vec` with a sparse map from stable
//! [`ViewId`]s to dense slots. Ids are generational so a stale id held by a
//! finished animation or a click handler can never reach a view that later
//! reused the same slot.
//!
//! Layout invalidation follows the usual bubbling scheme: marking a view
//! dirty walks up to the nearest relayout boundary (a container whose size
//! does not depend on its children) and queues it as a layout root.

use std::collections::HashSet;

use crate::view::{ChangeFlags, Dimension, View};

/// Unique identifier for a view in the tree.
///
/// `index` is a slot in the sparse array, `generation` increments every time
/// the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ViewId {
    index: u32,
    generation: u32,
}

impl ViewId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node {
    view: View,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    is_dirty: bool,
    is_relayout_boundary: bool,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

pub struct ViewTree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    layout_roots: HashSet<ViewId>,
    needs_paint: bool,
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
            layout_roots: HashSet::new(),
            needs_paint: true,
        }
    }

    /// Store a view and return its id. The view is detached until
    /// [`add_child`](Self::add_child) links it to a parent.
    pub fn register(&mut self, view: View) -> ViewId {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            let old_gen = self.sparse[idx as usize]
                .as_ref()
                .map(|e| e.generation)
                .unwrap_or(0);
            (idx, old_gen.wrapping_add(1))
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            (idx, 0)
        };

        let dense_index = self.dense.len();
        let id = ViewId::new(sparse_index, generation);
        let is_relayout_boundary = is_fixed_size_container(&view);

        self.dense.push(Node {
            view,
            parent: None,
            children: Vec::new(),
            is_dirty: false,
            is_relayout_boundary,
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        id
    }

    /// Remove a view and its whole subtree.
    ///
    /// The view is also unlinked from its parent's children.
    pub fn unregister(&mut self, id: ViewId) {
        let Some(dense_index) = self.get_dense_index(id) else {
            return;
        };

        if let Some(parent_id) = self.dense[dense_index].parent {
            if let Some(parent_dense) = self.get_dense_index(parent_id) {
                self.dense[parent_dense].children.retain(|&c| c != id);
            }
            self.mark_needs_layout(parent_id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(dense_index) = self.get_dense_index(current) else {
                continue;
            };
            pending.extend(self.dense[dense_index].children.iter().copied());

            let last_dense_index = self.dense.len() - 1;
            self.dense.swap_remove(dense_index);

            // Fix up the moved node's sparse entry
            if dense_index != last_dense_index {
                let moved_sparse_idx = self.dense[dense_index].sparse_index;
                if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                    entry.dense_index = dense_index;
                }
            }

            // Keep the generation around so the next allocation bumps it
            if let Some(ref mut entry) = self.sparse[current.index as usize] {
                entry.dense_index = usize::MAX;
            }
            self.free_indices.push(current.index);
            self.layout_roots.remove(&current);
        }
        self.needs_paint = true;
    }

    fn get_dense_index(&self, id: ViewId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation && e.dense_index != usize::MAX)
            .map(|e| e.dense_index)
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.get_dense_index(id).map(|idx| &self.dense[idx].view)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        let idx = self.get_dense_index(id)?;
        Some(&mut self.dense[idx].view)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.get_dense_index(id).is_some()
    }

    /// Find the first view registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
        self.dense.iter().find_map(|node| {
            (node.view.name() == Some(name)).then(|| {
                let generation = self.sparse[node.sparse_index as usize]
                    .as_ref()
                    .map(|e| e.generation)
                    .unwrap_or(0);
                ViewId::new(node.sparse_index, generation)
            })
        })
    }

    /// Append `child` to `parent` and queue a layout of the parent.
    pub fn add_child(&mut self, parent_id: ViewId, child_id: ViewId) {
        if !self.contains(parent_id) {
            return;
        }
        if let Some(child_dense) = self.get_dense_index(child_id) {
            self.dense[child_dense].parent = Some(parent_id);
        } else {
            return;
        }
        if let Some(parent_dense) = self.get_dense_index(parent_id) {
            let children = &mut self.dense[parent_dense].children;
            if !children.contains(&child_id) {
                children.push(child_id);
            }
        }
        self.mark_needs_layout(parent_id);
    }

    /// Detach `child` from `parent` and drop its subtree.
    ///
    /// Returns `false` if `child` is not currently a child of `parent`, so a
    /// second removal of the same view is a no-op.
    pub fn remove_child(&mut self, parent_id: ViewId, child_id: ViewId) -> bool {
        if self.parent(child_id) != Some(parent_id) {
            return false;
        }
        self.unregister(child_id);
        true
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.get_dense_index(id)
            .and_then(|idx| self.dense[idx].parent)
    }

    pub fn children(&self, id: ViewId) -> Vec<ViewId> {
        self.get_dense_index(id)
            .map(|idx| self.dense[idx].children.clone())
            .unwrap_or_default()
    }

    /// Mark a view as needing layout.
    ///
    /// The dirty flag bubbles up to the nearest relayout boundary, which is
    /// added to the layout queue. Stops early on an already dirty view since
    /// its boundary is already queued.
    pub fn mark_needs_layout(&mut self, view_id: ViewId) {
        let mut current = view_id;

        loop {
            let Some(dense_idx) = self.get_dense_index(current) else {
                return;
            };

            if self.dense[dense_idx].is_dirty {
                return;
            }
            self.dense[dense_idx].is_dirty = true;

            if self.dense[dense_idx].is_relayout_boundary {
                self.layout_roots.insert(current);
                return;
            }

            match self.dense[dense_idx].parent {
                Some(parent) => current = parent,
                None => {
                    self.layout_roots.insert(current);
                    return;
                }
            }
        }
    }

    pub fn clear_dirty(&mut self, id: ViewId) {
        if let Some(idx) = self.get_dense_index(id) {
            self.dense[idx].is_dirty = false;
        }
    }

    pub fn is_dirty(&self, id: ViewId) -> bool {
        self.get_dense_index(id)
            .map(|idx| self.dense[idx].is_dirty)
            .unwrap_or(false)
    }

    pub fn is_relayout_boundary(&self, id: ViewId) -> bool {
        self.get_dense_index(id)
            .map(|idx| self.dense[idx].is_relayout_boundary)
            .unwrap_or(false)
    }

    /// Fold every view's pending [`ChangeFlags`] into the tree: layout
    /// changes are queued for the next layout pass, paint changes raise the
    /// tree-wide repaint flag.
    pub fn collect_changes(&mut self) {
        let mut needs_layout = Vec::new();
        for node in &mut self.dense {
            let flags = node.view.take_change_flags();
            if flags.contains(ChangeFlags::NEEDS_LAYOUT) {
                let generation = self.sparse[node.sparse_index as usize]
                    .as_ref()
                    .map(|e| e.generation)
                    .unwrap_or(0);
                needs_layout.push(ViewId::new(node.sparse_index, generation));
            }
            if flags.contains(ChangeFlags::NEEDS_PAINT) {
                self.needs_paint = true;
            }
        }
        for id in needs_layout {
            self.mark_needs_layout(id);
        }
    }

    pub fn take_layout_roots(&mut self) -> Vec<ViewId> {
        self.layout_roots.drain().collect()
    }

    pub fn has_layout_roots(&self) -> bool {
        !self.layout_roots.is_empty()
    }

    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    pub fn clear_paint_flag(&mut self) {
        self.needs_paint = false;
    }

    /// Offset of a view's frame from the tree root, ignoring render
    /// properties of the view and its ancestors.
    pub fn absolute_offset(&self, id: ViewId) -> Option<(f32, f32)> {
        let mut current = Some(id);
        let mut total = (0.0, 0.0);
        while let Some(view_id) = current {
            let (x, y) = self.get(view_id)?.offset();
            total.0 += x;
            total.1 += y;
            current = self.parent(view_id);
        }
        Some(total)
    }

    pub fn view_count(&self) -> usize {
        self.dense.len()
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A container whose size is fully determined by its parent never changes
/// size when its children do.
fn is_fixed_size_container(view: &View) -> bool {
    let params = view.layout_params();
    let fixed = |d: Dimension| !matches!(d, Dimension::WrapContent);
    view.kind().is_container() && fixed(params.width) && fixed(params.height)
}
