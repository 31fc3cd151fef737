//! Leaf/branch tree walker
//!
//! One traversal shared by show, update, layout, hide and the animation calls,
//! so they all visit nodes in the same order.
//!
//! A child *qualifies* when it is skeletonable, or when it is a plain container
//! with at least one qualifying descendant. Excluded children never qualify and
//! their subtrees are not entered. A visited node with qualifying children is a
//! **branch**; one without is a **leaf**. The walk is depth-first pre-order and
//! follows document order among siblings.
//!
//! The whole visit list is computed before any callback runs, so callbacks are
//! free to mutate the tree without disturbing the current walk.

use crate::skeletonable::{Capability, SkeletonNodes};

/// Traversal classification of a visited node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// No qualifying children; receives decoration directly
    Leaf,
    /// Has qualifying children; recursed into, never decorated itself
    Branch,
}

/// One step of a walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit<Id> {
    pub node: Id,
    pub class: NodeClass,
    /// Distance from the walk root
    pub depth: usize,
}

/// A frozen pre-order walk over the skeleton-relevant part of a tree
#[derive(Clone, Debug)]
pub struct TreeWalker<Id> {
    visits: Vec<Visit<Id>>,
}

impl<Id: Copy + Eq + std::fmt::Debug> TreeWalker<Id> {
    /// Compute the walk rooted at `root`
    ///
    /// The root is classified like any other node. An excluded root, or a
    /// plain root with no qualifying descendants, produces an empty walk.
    pub fn plan<T>(tree: &T, root: Id) -> Self
    where
        T: SkeletonNodes<Id = Id> + ?Sized,
    {
        let mut visits = Vec::new();
        collect(tree, root, &mut visits);
        Self { visits }
    }

    pub fn visits(&self) -> &[Visit<Id>] {
        &self.visits
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn leaves(&self) -> impl Iterator<Item = Id> + '_ {
        self.of_class(NodeClass::Leaf)
    }

    pub fn branches(&self) -> impl Iterator<Item = Id> + '_ {
        self.of_class(NodeClass::Branch)
    }

    fn of_class(&self, class: NodeClass) -> impl Iterator<Item = Id> + '_ {
        self.visits
            .iter()
            .filter(move |visit| visit.class == class)
            .map(|visit| visit.node)
    }

    /// Run the walk, handing `ctx` to the matching callback at each step
    pub fn run<C: ?Sized>(
        &self,
        ctx: &mut C,
        mut leaf: impl FnMut(&mut C, Id),
        mut branch: impl FnMut(&mut C, Id),
    ) {
        for visit in &self.visits {
            tracing::trace!(node = ?visit.node, class = ?visit.class, depth = visit.depth, "visit");
            match visit.class {
                NodeClass::Leaf => leaf(ctx, visit.node),
                NodeClass::Branch => branch(ctx, visit.node),
            }
        }
    }
}

/// Pending work for [`collect`]
enum Step<Id> {
    /// Classify `node` and queue its children
    Enter { node: Id, depth: usize },
    /// Children of the visit at `slot` are done; settle its class
    Exit { slot: usize, skeletonable: bool },
}

/// Push `root` and its qualifying subtree onto `visits`, in pre-order
///
/// Uses an explicit stack so tree depth is bounded by memory, not the call
/// stack. A node's subtree always occupies the visits right after its own
/// slot, so anything past the slot at exit time is a qualifying descendant.
fn collect<T>(tree: &T, root: T::Id, visits: &mut Vec<Visit<T::Id>>)
where
    T: SkeletonNodes + ?Sized,
{
    let mut stack = vec![Step::Enter {
        node: root,
        depth: 0,
    }];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter { node, depth } => {
                let capability = tree.capability(node);
                if capability == Capability::Excluded {
                    continue;
                }

                let slot = visits.len();
                visits.push(Visit {
                    node,
                    class: NodeClass::Leaf,
                    depth,
                });
                stack.push(Step::Exit {
                    slot,
                    skeletonable: capability.is_skeletonable(),
                });
                // Reversed so the first child is entered first
                let children = tree.skeleton_children(node);
                stack.extend(children.into_iter().rev().map(|child| Step::Enter {
                    node: child,
                    depth: depth + 1,
                }));
            }
            Step::Exit { slot, skeletonable } => {
                if visits.len() > slot + 1 {
                    visits[slot].class = NodeClass::Branch;
                } else if !skeletonable {
                    visits.truncate(slot);
                }
            }
        }
    }
}

/// Walk `tree` from `root`, calling `leaf` or `branch` on each visited node
///
/// Callbacks receive the tree mutably; structural edits they make take effect
/// on the next walk.
pub fn traverse<T>(
    tree: &mut T,
    root: T::Id,
    leaf: impl FnMut(&mut T, T::Id),
    branch: impl FnMut(&mut T, T::Id),
) where
    T: SkeletonNodes,
{
    let walker = TreeWalker::plan(&*tree, root);
    walker.run(tree, leaf, branch);
}
