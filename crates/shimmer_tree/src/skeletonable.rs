//! The skeletonable capability
//!
//! Whether a node can host a skeleton is a property of the node's view, not of
//! its type in any hierarchy. Host views implement [`Skeletonable`] and report
//! a [`Capability`]; the walker and the engine only ever look at that value.
//!
//! ```rust
//! use shimmer_tree::{Capability, Skeletonable};
//!
//! enum View {
//!     Label,
//!     Avatar,
//!     Stack,
//!     Spinner,
//! }
//!
//! impl Skeletonable for View {
//!     fn capability(&self) -> Capability {
//!         match self {
//!             View::Label | View::Avatar => Capability::Skeletonable,
//!             View::Stack => Capability::Plain,
//!             View::Spinner => Capability::Excluded,
//!         }
//!     }
//! }
//! ```

use smallvec::SmallVec;

/// How a node takes part in skeleton traversal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Not skeletonable; visited only as a pass-through container when it has
    /// skeletonable descendants
    #[default]
    Plain,
    /// Can host a skeleton
    Skeletonable,
    /// Skipped entirely, together with its subtree
    Excluded,
}

impl Capability {
    pub fn is_skeletonable(&self) -> bool {
        matches!(self, Capability::Skeletonable)
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Capability::Excluded)
    }
}

/// Implemented by host views to report their capability
pub trait Skeletonable {
    fn capability(&self) -> Capability;
}

impl Skeletonable for Capability {
    fn capability(&self) -> Capability {
        *self
    }
}

impl<T: Skeletonable + ?Sized> Skeletonable for Box<T> {
    fn capability(&self) -> Capability {
        (**self).capability()
    }
}

/// Child list returned by [`SkeletonNodes::skeleton_children`]
pub type ChildList<Id> = SmallVec<[Id; 8]>;

/// Read access the tree walker needs from a node store
pub trait SkeletonNodes {
    type Id: Copy + Eq + std::fmt::Debug;

    /// Children in document order
    fn skeleton_children(&self, node: Self::Id) -> ChildList<Self::Id>;

    /// Capability of `node`; unknown nodes report [`Capability::Excluded`]
    fn capability(&self, node: Self::Id) -> Capability;
}
