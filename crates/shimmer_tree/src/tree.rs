//! Skeleton tree management
//!
//! The host mirrors its view hierarchy into a [`SkeletonTree`]: one node per
//! view, holding the view value, its children in document order, its current
//! size and the skeleton state attached to it. The tree never reparents or
//! deletes anything on its own; only host calls change structure.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{Result, TreeError};
use crate::skeletonable::{Capability, ChildList, SkeletonNodes, Skeletonable};
use crate::state::NodeSkeletonState;

new_key_type! {
    pub struct NodeId;
}

/// Node size in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

struct TreeNode<V> {
    view: V,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
    size: Size,
    /// Set when the node's size or children changed since its last layout
    needs_layout: bool,
    skeleton: NodeSkeletonState,
}

/// Retained mirror of the host view hierarchy
pub struct SkeletonTree<V> {
    nodes: SlotMap<NodeId, TreeNode<V>>,
}

impl<V> SkeletonTree<V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Insert a detached node
    pub fn insert(&mut self, view: V) -> NodeId {
        self.insert_with_size(view, Size::ZERO)
    }

    /// Insert a detached node with an initial size
    pub fn insert_with_size(&mut self, view: V, size: Size) -> NodeId {
        self.nodes.insert(TreeNode {
            view,
            parent: None,
            children: SmallVec::new(),
            size,
            needs_layout: false,
            skeleton: NodeSkeletonState::default(),
        })
    }

    /// Insert a node and append it to `parent`
    pub fn add_child(&mut self, parent: NodeId, view: V) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        let child = self.insert(view);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Attach a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self
            .nodes
            .get(parent)
            .map(|node| node.children.len())
            .ok_or(TreeError::UnknownNode(parent))?;
        self.insert_child(parent, index, child)
    }

    /// Attach a detached node at `index` among `parent`'s children
    ///
    /// `index` is clamped to the child count. Marks `parent` as needing layout.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        let childless = match self.nodes.get(child) {
            None => return Err(TreeError::UnknownNode(child)),
            Some(node) if node.parent.is_some() => return Err(TreeError::AlreadyAttached(child)),
            Some(node) => node.children.is_empty(),
        };
        // A childless node cannot be anyone's ancestor
        if parent == child || (!childless && self.is_ancestor(child, parent)) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }

        let parent_node = &mut self.nodes[parent];
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        parent_node.needs_layout = true;
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Remove a node and its whole subtree, returning the node's view
    pub fn remove(&mut self, id: NodeId) -> Option<V> {
        let parent = self.nodes.get(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
            parent.needs_layout = true;
        }

        let mut stack: Vec<NodeId> = self.nodes[id].children.to_vec();
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        self.nodes.remove(id).map(|node| node.view)
    }

    /// Check whether `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children in document order; empty for unknown nodes
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn view(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(id).map(|node| &node.view)
    }

    pub fn view_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.nodes.get_mut(id).map(|node| &mut node.view)
    }

    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.nodes.get(id).map(|node| node.size)
    }

    /// Record a new size for `id`
    ///
    /// A changed size marks the node and its parent as needing layout.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.size == size {
            return;
        }
        node.size = size;
        node.needs_layout = true;
        let parent = node.parent;
        if let Some(parent) = parent {
            self.mark_needs_layout(parent);
        }
    }

    pub fn needs_layout(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.needs_layout)
    }

    pub fn mark_needs_layout(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.needs_layout = true;
        }
    }

    /// Check and clear the needs-layout flag
    pub(crate) fn take_needs_layout(&mut self, id: NodeId) -> bool {
        self.nodes
            .get_mut(id)
            .map(|node| std::mem::take(&mut node.needs_layout))
            .unwrap_or(false)
    }

    /// Skeleton state attached to `id`
    pub fn skeleton(&self, id: NodeId) -> Option<&NodeSkeletonState> {
        self.nodes.get(id).map(|node| &node.skeleton)
    }

    pub(crate) fn skeleton_mut(&mut self, id: NodeId) -> Option<&mut NodeSkeletonState> {
        self.nodes.get_mut(id).map(|node| &mut node.skeleton)
    }

    /// Every node id in pre-order starting at `root`, regardless of capability
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl<V> Default for SkeletonTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for SkeletonTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkeletonTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl<V: Skeletonable> SkeletonTree<V> {
    /// Capability of `id`'s view; unknown nodes report [`Capability::Excluded`]
    pub fn capability(&self, id: NodeId) -> Capability {
        self.nodes
            .get(id)
            .map(|node| node.view.capability())
            .unwrap_or(Capability::Excluded)
    }
}

impl<V: Skeletonable> SkeletonNodes for SkeletonTree<V> {
    type Id = NodeId;

    fn skeleton_children(&self, node: NodeId) -> ChildList<NodeId> {
        self.children(node).iter().copied().collect()
    }

    fn capability(&self, node: NodeId) -> Capability {
        SkeletonTree::capability(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_document_order() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        let a = tree.add_child(root, Capability::Skeletonable).unwrap();
        let c = tree.add_child(root, Capability::Skeletonable).unwrap();
        let b = tree.insert(Capability::Skeletonable);
        tree.insert_child(root, 1, b).unwrap();

        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn test_rejects_cycles_and_double_parenting() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        let child = tree.add_child(root, Capability::Plain).unwrap();

        assert_eq!(
            tree.append_child(child, root),
            Err(TreeError::WouldCreateCycle {
                parent: child,
                child: root
            })
        );
        let other = tree.insert(Capability::Plain);
        assert_eq!(
            tree.append_child(other, child),
            Err(TreeError::AlreadyAttached(child))
        );
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        let branch = tree.add_child(root, Capability::Plain).unwrap();
        let leaf = tree.add_child(branch, Capability::Skeletonable).unwrap();

        assert_eq!(tree.remove(branch), Some(Capability::Plain));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.capability(leaf), Capability::Excluded);
    }

    #[test]
    fn test_set_size_marks_node_and_parent() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        let leaf = tree.add_child(root, Capability::Skeletonable).unwrap();
        tree.take_needs_layout(root);

        tree.set_size(leaf, Size::new(10.0, 10.0));
        assert!(tree.needs_layout(leaf));
        assert!(tree.take_needs_layout(root));
        assert!(!tree.needs_layout(root));

        // Same size again is not a change
        tree.take_needs_layout(leaf);
        tree.set_size(leaf, Size::new(10.0, 10.0));
        assert!(!tree.needs_layout(leaf));
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        let a = tree.add_child(root, Capability::Plain).unwrap();
        let a1 = tree.add_child(a, Capability::Plain).unwrap();
        let b = tree.add_child(root, Capability::Plain).unwrap();

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
    }
}
